pub mod entity;
pub mod error;
pub mod report;
pub mod schema;
pub mod value;

pub use entity::Entity;
pub use error::{Result, SchemaError};
pub use report::{CleaningReport, MAX_SAMPLES, RejectReason, RejectTally};
pub use schema::{
    ColumnSpec, EntitySchema, ForeignKey, SqlType, StorageKind, referenced_table, resolve,
    schema_for, schemas_in_load_order,
};
pub use value::CellValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_and_samples() {
        let mut report = CleaningReport::new(Entity::Card, 5);
        report.record(RejectReason::InvalidCardNumber, None, "1234");
        report.record(RejectReason::InvalidCardNumber, None, "1234");
        report.record(RejectReason::InvalidCardNumber, None, "99");
        report.record(RejectReason::Duplicate, None, "4111111111111111");
        report.output_rows = 1;
        assert_eq!(report.count_for(RejectReason::InvalidCardNumber), 3);
        assert_eq!(report.rejections[0].samples, vec!["1234", "99"]);
        assert_eq!(report.dropped(), 4);
        assert!(!report.is_clean());
    }

    #[test]
    fn report_serializes() {
        let mut report = CleaningReport::new(Entity::Orders, 2);
        report.record(RejectReason::OrphanReference, Some("store_code"), "XX-1");
        let json = serde_json::to_string(&report).expect("serialize report");
        assert!(json.contains("\"orphan_reference\""));
        let round: CleaningReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round.entity, Entity::Orders);
        assert_eq!(round.rejections[0].column.as_deref(), Some("store_code"));
    }
}
