pub mod result_table;
pub mod wizard;

pub use wizard::OlapWizardPage;
