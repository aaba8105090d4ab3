pub mod account;
pub mod entry;
pub mod profile;

pub use account::{Account, Session};
pub use entry::{FinancialEntry, Holding};
pub use profile::Profile;
