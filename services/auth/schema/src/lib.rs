//! sea-orm entities for the auth service database.

pub mod otps;
