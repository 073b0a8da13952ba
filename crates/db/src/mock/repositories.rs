use chrono::{DateTime, NaiveDate, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbAccount, DbAppointment, DbAppointmentStop, DbBreak, DbCustomer, DbCustomerEvent, DbGroomer,
    DbRouteDay, DbServiceArea, DbWaitlistCandidate,
};
use groomroute_core::models::area::ResolvedAreaDay;

// Mock repositories for testing
mock! {
    pub AccountRepo {
        pub async fn get_account_by_id(&self, id: Uuid) -> eyre::Result<Option<DbAccount>>;
    }
}

mock! {
    pub GroomerRepo {
        pub async fn get_groomer_by_id(
            &self,
            account_id: Uuid,
            id: Uuid,
        ) -> eyre::Result<Option<DbGroomer>>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn list_active_for_groomer_window(
            &self,
            account_id: Uuid,
            groomer_id: Uuid,
            window_start: DateTime<Utc>,
            window_end: DateTime<Utc>,
            exclude_id: Option<Uuid>,
        ) -> eyre::Result<Vec<DbAppointment>>;

        pub async fn list_stops_for_groomer_window(
            &self,
            account_id: Uuid,
            groomer_id: Uuid,
            window_start: DateTime<Utc>,
            window_end: DateTime<Utc>,
            exclude_id: Option<Uuid>,
        ) -> eyre::Result<Vec<DbAppointmentStop>>;

        pub async fn get_appointment_by_id(
            &self,
            account_id: Uuid,
            id: Uuid,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn get_appointments_by_ids(
            &self,
            account_id: Uuid,
            ids: Vec<Uuid>,
        ) -> eyre::Result<Vec<DbAppointment>>;

        pub async fn update_start_at(
            &self,
            account_id: Uuid,
            id: Uuid,
            start_at: DateTime<Utc>,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub CustomerRepo {
        pub async fn get_customer_by_id(
            &self,
            account_id: Uuid,
            id: Uuid,
        ) -> eyre::Result<Option<DbCustomer>>;

        pub async fn update_service_area(
            &self,
            account_id: Uuid,
            customer_id: Uuid,
            area_id: Uuid,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub AreaRepo {
        pub async fn list_areas_for_account(
            &self,
            account_id: Uuid,
        ) -> eyre::Result<Vec<DbServiceArea>>;

        pub async fn get_area_by_id(
            &self,
            account_id: Uuid,
            id: Uuid,
        ) -> eyre::Result<Option<DbServiceArea>>;

        pub async fn list_assigned_days_for_area(
            &self,
            groomer_id: Uuid,
            area_id: Uuid,
        ) -> eyre::Result<Vec<i16>>;

        pub async fn resolve_area_days(
            &self,
            groomer_id: Uuid,
            from: NaiveDate,
            to: NaiveDate,
        ) -> eyre::Result<Vec<ResolvedAreaDay>>;
    }
}

mock! {
    pub RouteRepo {
        pub async fn upsert_route_day(
            &self,
            groomer_id: Uuid,
            route_date: NaiveDate,
            day_started: Option<bool>,
            has_assistant: Option<bool>,
        ) -> eyre::Result<DbRouteDay>;
    }
}

mock! {
    pub BreakRepo {
        pub async fn list_breaks_for_groomer_date(
            &self,
            account_id: Uuid,
            groomer_id: Uuid,
            break_date: NaiveDate,
        ) -> eyre::Result<Vec<DbBreak>>;

        pub async fn create_break(
            &self,
            account_id: Uuid,
            groomer_id: Uuid,
            break_date: NaiveDate,
            break_type: String,
            planned_start: Option<DateTime<Utc>>,
            planned_end: Option<DateTime<Utc>>,
        ) -> eyre::Result<DbBreak>;

        pub async fn mark_break_taken(
            &self,
            account_id: Uuid,
            id: Uuid,
            actual_start: DateTime<Utc>,
            actual_minutes: i32,
        ) -> eyre::Result<DbBreak>;
    }
}

mock! {
    pub EventRepo {
        pub async fn append_customer_event(
            &self,
            account_id: Uuid,
            customer_id: Uuid,
            actor: String,
            action: String,
            reason: Option<String>,
        ) -> eyre::Result<DbCustomerEvent>;
    }
}

mock! {
    pub WaitlistRepo {
        pub async fn list_candidates_for_account(
            &self,
            account_id: Uuid,
        ) -> eyre::Result<Vec<DbWaitlistCandidate>>;
    }
}
