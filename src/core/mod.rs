pub mod assembler;
pub mod cases;
pub mod dom;
pub mod engine;
pub mod fetch;
pub mod incidence;
pub mod rules;
pub mod vaccinations;

pub use crate::domain::model::{CaseRecord, IncidenceRecord, ResponseEnvelope};
pub use crate::domain::ports::{ConfigProvider, PageSource};
pub use crate::utils::error::Result;
