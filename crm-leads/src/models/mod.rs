//! Domain models for the lead scoring and qualification engine

pub mod crm;
pub mod lead;
pub mod requests;
pub mod status;

pub use crm::{Company, Contact, Deal, DealStage, Partner, PartnerStatus, Product};
pub use lead::{DecisionRole, Lead, LeadSource, Motivation, SalesMotion, Tier};
pub use requests::{CreateLeadRequest, LeadFilter, UpdateScoringFieldsRequest};
pub use status::LeadStatus;
