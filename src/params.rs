use crate::error::{MalformedInput, Result};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::str::FromStr;

/// Header the first table row must match, in order.
const EXPECTED_HEADER: [&str; 6] = ["k", "h", "m", "p", "q", "f"];

/// RAPPOR encoding parameters.
///
/// These control the privacy/utility trade-off of the reports; see the RAPPOR
/// paper for how. Instances are plain values: construct once (defaults,
/// builder, or [`RapporParams::from_csv`]) and share read-only.
#[derive(Clone, Debug, PartialEq, Builder)]
#[builder(pattern = "owned")]
pub struct RapporParams {
    /// Width of each Bloom filter, in bits (k)
    #[builder(default = "16")]
    pub num_bloombits: usize,

    /// Number of hash functions applied per value (h)
    #[builder(default = "2")]
    pub num_hashes: usize,

    /// Number of cohort partitions used for collision reduction (m)
    #[builder(default = "64")]
    pub num_cohorts: usize,

    /// Probability p of the first-stage (instantaneous) randomized response
    #[builder(default = "0.50")]
    pub prob_p: f64,

    /// Probability q of the second-stage (instantaneous) randomized response
    #[builder(default = "0.75")]
    pub prob_q: f64,

    /// Probability f of the permanent (memoizing) randomized response
    #[builder(default = "0.50")]
    pub prob_f: f64,
}

impl Default for RapporParams {
    fn default() -> Self {
        Self {
            num_bloombits: 16,
            num_hashes: 2,
            num_cohorts: 64,
            prob_p: 0.50,
            prob_q: 0.75,
            prob_f: 0.50,
        }
    }
}

/// Parameter record under the key names the aggregation service expects.
///
/// The renaming is a fixed wire contract, including the non-obvious
/// probability mapping: `probPrr` is f, `probIrr0` is p, `probIrr1` is q.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibleParams {
    pub num_bits: usize,
    pub num_hashes: usize,
    pub num_cohorts: usize,
    pub prob_prr: f64,
    pub prob_irr0: f64,
    pub prob_irr1: f64,
}

impl RapporParams {
    /// Reads the parameters from a two-row comma-separated table.
    ///
    /// Row 0 must be the literal header `k,h,m,p,q,f`; row 1 carries the six
    /// values as int,int,int,float,float,float. Anything else (missing value
    /// row, extra rows, wrong arity, non-numeric field) fails with
    /// [`crate::RapporError::MalformedInput`]. The parse is purely syntactic:
    /// no range checks on the numbers.
    pub fn from_csv<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(MalformedInput::MissingParameterRow.into()),
        };
        if header.split(',').collect::<Vec<_>>() != EXPECTED_HEADER {
            return Err(MalformedInput::Header { received: header }.into());
        }

        let row = match lines.next() {
            Some(line) => line?,
            None => return Err(MalformedInput::MissingParameterRow.into()),
        };
        let params = Self::parse_value_row(&row)?;

        if lines.next().is_some() {
            return Err(MalformedInput::ExtraRows.into());
        }
        Ok(params)
    }

    fn parse_value_row(row: &str) -> Result<Self> {
        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() != EXPECTED_HEADER.len() {
            return Err(MalformedInput::ValueRow {
                row: row.to_string(),
                cause: format!(
                    "expected {} fields, got {}",
                    EXPECTED_HEADER.len(),
                    fields.len()
                ),
            }
            .into());
        }

        Ok(Self {
            num_bloombits: parse_field(fields[0], "k", row)?,
            num_hashes: parse_field(fields[1], "h", row)?,
            num_cohorts: parse_field(fields[2], "m", row)?,
            prob_p: parse_field(fields[3], "p", row)?,
            prob_q: parse_field(fields[4], "q", row)?,
            prob_f: parse_field(fields[5], "f", row)?,
        })
    }

    /// Renames the fields for the aggregation service; see
    /// [`CompatibleParams`].
    pub fn to_compatible_json(&self) -> CompatibleParams {
        CompatibleParams {
            num_bits: self.num_bloombits,
            num_hashes: self.num_hashes,
            num_cohorts: self.num_cohorts,
            prob_prr: self.prob_f,
            prob_irr0: self.prob_p,
            prob_irr1: self.prob_q,
        }
    }

    /// Compatibility JSON as a string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_compatible_json())?)
    }
}

fn parse_field<T>(field: &str, name: &str, row: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    // int()/float() in the reference tolerate surrounding whitespace
    field.trim().parse().map_err(|err: T::Err| {
        MalformedInput::ValueRow {
            row: row.to_string(),
            cause: format!("field {name} {field:?}: {err}"),
        }
        .into()
    })
}
