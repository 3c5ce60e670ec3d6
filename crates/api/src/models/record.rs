use super::entity::{EntityKind, EntityRole};
use crate::error::{ApiError, ApiResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of comma-separated fields in one serialized record.
pub const RECORD_FIELDS: usize = 14;

/// One emitted line of the cross-reference stream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct IndexRecord {
    pub begin_file: String,
    pub begin_offset: u32,
    pub begin_line: u32,
    pub begin_column: u32,
    pub end_file: String,
    pub end_offset: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub role: EntityRole,
    pub specifier: EntityKind,
    /// Type spelling; may contain commas (e.g. template arguments).
    #[serde(rename = "type")]
    pub type_spelling: String,
    pub name: String,
    pub scope: String,
    pub ref_scope: String,
}

impl IndexRecord {
    /// JSON schema of a record, for consumers of the JSON-lines output.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(IndexRecord)
    }
}

impl fmt::Display for IndexRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.begin_file,
            self.begin_offset,
            self.begin_line,
            self.begin_column,
            self.end_file,
            self.end_offset,
            self.end_line,
            self.end_column,
            self.role,
            self.specifier,
            self.type_spelling,
            self.name,
            self.scope,
            self.ref_scope
        )
    }
}

fn parse_number(field: &'static str, raw: &str) -> ApiResult<u32> {
    raw.parse().map_err(|e: std::num::ParseIntError| ApiError::Malformed {
        field,
        reason: format!("{raw:?}: {e}"),
    })
}

impl FromStr for IndexRecord {
    type Err = ApiError;

    /// The type spelling is the only field allowed to contain commas, so the
    /// ten leading and three trailing fields are split off around it.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let found = line.matches(',').count() + 1;
        if found < RECORD_FIELDS {
            return Err(ApiError::FieldCount {
                expected: RECORD_FIELDS,
                found,
            });
        }

        let head: Vec<&str> = line.splitn(11, ',').collect();
        let mut tail: Vec<&str> = head[10].rsplitn(4, ',').collect();
        tail.reverse();

        Ok(IndexRecord {
            begin_file: head[0].to_string(),
            begin_offset: parse_number("begin_offset", head[1])?,
            begin_line: parse_number("begin_line", head[2])?,
            begin_column: parse_number("begin_column", head[3])?,
            end_file: head[4].to_string(),
            end_offset: parse_number("end_offset", head[5])?,
            end_line: parse_number("end_line", head[6])?,
            end_column: parse_number("end_column", head[7])?,
            role: head[8].parse()?,
            specifier: head[9].parse()?,
            type_spelling: tail[0].to_string(),
            name: tail[1].to_string(),
            scope: tail[2].to_string(),
            ref_scope: tail[3].to_string(),
        })
    }
}
