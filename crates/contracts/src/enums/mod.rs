pub mod finance_status;
pub mod lead_source;
pub mod lead_status;
pub mod temperature;

pub use finance_status::FinanceStatus;
pub use lead_source::LeadSource;
pub use lead_status::LeadStatus;
pub use temperature::Temperature;
