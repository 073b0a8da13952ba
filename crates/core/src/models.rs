pub mod account;
pub mod appointment;
pub mod area;
pub mod breaks;
pub mod customer;
pub mod groomer;
pub mod route;
pub mod waitlist;
