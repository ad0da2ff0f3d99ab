pub mod accounts;
pub mod files;
pub mod health;
pub mod imports;
