use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create accounts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'UTC',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create groomers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS groomers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            account_id UUID NOT NULL REFERENCES accounts(id),
            name VARCHAR(255) NOT NULL,
            work_start TIME NOT NULL DEFAULT '09:00',
            work_end TIME NOT NULL DEFAULT '17:00',
            large_dog_daily_limit INTEGER NULL,
            default_assistant BOOLEAN NOT NULL DEFAULT FALSE,
            phone VARCHAR(32) NULL,
            email VARCHAR(255) NULL,
            booking_slug VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_work_hours CHECK (work_end > work_start)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create service_areas table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service_areas (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            account_id UUID NOT NULL REFERENCES accounts(id),
            name VARCHAR(255) NOT NULL,
            color VARCHAR(16) NOT NULL DEFAULT '#888888',
            zip_codes TEXT[] NOT NULL DEFAULT '{}',
            center_lat DOUBLE PRECISION NULL,
            center_lng DOUBLE PRECISION NULL,
            radius_miles DOUBLE PRECISION NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create customers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            account_id UUID NOT NULL REFERENCES accounts(id),
            name VARCHAR(255) NOT NULL,
            lat DOUBLE PRECISION NULL,
            lng DOUBLE PRECISION NULL,
            zip_code VARCHAR(16) NULL,
            cancellation_count INTEGER NOT NULL DEFAULT 0,
            no_show_count INTEGER NOT NULL DEFAULT 0,
            lifetime_spend_cents BIGINT NOT NULL DEFAULT 0,
            service_area_id UUID NULL REFERENCES service_areas(id),
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create pets table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pets (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            account_id UUID NOT NULL REFERENCES accounts(id),
            customer_id UUID NOT NULL REFERENCES customers(id),
            name VARCHAR(255) NOT NULL,
            weight_lbs DOUBLE PRECISION NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            account_id UUID NOT NULL REFERENCES accounts(id),
            groomer_id UUID NOT NULL REFERENCES groomers(id),
            customer_id UUID NOT NULL REFERENCES customers(id),
            pet_id UUID NULL REFERENCES pets(id),
            start_at TIMESTAMP WITH TIME ZONE NOT NULL,
            service_minutes INTEGER NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'SCHEDULED',
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_service_minutes CHECK (service_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create area_day_assignments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS area_day_assignments (
            groomer_id UUID NOT NULL REFERENCES groomers(id),
            day_of_week SMALLINT NOT NULL,
            area_id UUID NOT NULL REFERENCES service_areas(id),
            PRIMARY KEY (groomer_id, day_of_week),
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create area_date_overrides table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS area_date_overrides (
            groomer_id UUID NOT NULL REFERENCES groomers(id),
            override_date DATE NOT NULL,
            area_id UUID NOT NULL REFERENCES service_areas(id),
            PRIMARY KEY (groomer_id, override_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create route_days table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS route_days (
            groomer_id UUID NOT NULL REFERENCES groomers(id),
            route_date DATE NOT NULL,
            day_started BOOLEAN NOT NULL DEFAULT FALSE,
            has_assistant BOOLEAN NOT NULL DEFAULT FALSE,
            PRIMARY KEY (groomer_id, route_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create breaks table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS breaks (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            account_id UUID NOT NULL REFERENCES accounts(id),
            groomer_id UUID NOT NULL REFERENCES groomers(id),
            break_date DATE NOT NULL,
            break_type VARCHAR(16) NOT NULL,
            planned_start TIMESTAMP WITH TIME ZONE NULL,
            planned_end TIMESTAMP WITH TIME ZONE NULL,
            taken BOOLEAN NOT NULL DEFAULT FALSE,
            actual_start TIMESTAMP WITH TIME ZONE NULL,
            actual_minutes INTEGER NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create waitlist_entries table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS waitlist_entries (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            account_id UUID NOT NULL REFERENCES accounts(id),
            customer_id UUID NOT NULL REFERENCES customers(id),
            preferred_days SMALLINT[] NOT NULL DEFAULT '{}',
            earliest_time TIME NULL,
            latest_time TIME NULL,
            service_minutes INTEGER NOT NULL DEFAULT 60,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create customer_events table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customer_events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            account_id UUID NOT NULL REFERENCES accounts(id),
            customer_id UUID NOT NULL REFERENCES customers(id),
            actor VARCHAR(255) NOT NULL,
            action VARCHAR(32) NOT NULL,
            reason TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_groomers_account_id ON groomers(account_id);
        CREATE INDEX IF NOT EXISTS idx_customers_account_id ON customers(account_id);
        CREATE INDEX IF NOT EXISTS idx_pets_customer_id ON pets(customer_id);
        CREATE INDEX IF NOT EXISTS idx_service_areas_account_id ON service_areas(account_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_account_id ON appointments(account_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_groomer_start ON appointments(groomer_id, start_at);
        CREATE INDEX IF NOT EXISTS idx_appointments_customer_id ON appointments(customer_id);
        CREATE INDEX IF NOT EXISTS idx_area_date_overrides_date ON area_date_overrides(override_date);
        CREATE INDEX IF NOT EXISTS idx_breaks_groomer_date ON breaks(groomer_id, break_date);
        CREATE INDEX IF NOT EXISTS idx_waitlist_entries_account_id ON waitlist_entries(account_id);
        CREATE INDEX IF NOT EXISTS idx_customer_events_customer_id ON customer_events(customer_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
