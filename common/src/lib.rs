//! Logbook Audit Common Library
//!
//! CLIから使う純粋な型とロジック（ネットワーク・描画なし）

pub mod batch;
pub mod card;
pub mod error;
pub mod layout;
pub mod parser;
pub mod prompts;
pub mod report;
pub mod schema;
pub mod types;

pub use batch::{batch_count, plan_batches, BatchRange, DEFAULT_BATCH_SIZE};
pub use card::{layout_card, layout_section, CardLayout, CardLine, FieldSpec, SectionSpec, SECTIONS};
pub use error::{Error, Result};
pub use parser::{extract_json, parse_audit_response};
pub use prompts::{build_instructions, Instructions};
pub use report::{render_tab, AuditTab, TabContent, Table, NOT_SPECIFIED};
pub use schema::{audit_schema, SCHEMA_NAME};
pub use types::AuditReport;
