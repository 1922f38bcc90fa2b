//! Golden wire vectors for the record codec.
//!
//! Each vector pins the exact bytes a record is stored as. Ledger data
//! written by other deployments must decode to the same record, and our
//! encoder must reproduce it byte for byte.

use fundledger_core::{decode_record, encode_record, FundRecord};

/// A golden wire vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Fund id.
    pub fund_id: &'static str,
    /// Fund name.
    pub fund_name: &'static str,
    /// Investor name.
    pub investor: &'static str,
    /// Invested amount.
    pub amount: f64,
    /// Annual return rate in percent.
    pub return_rate: f64,
    /// Duration in months.
    pub duration: i64,
    /// Expected stored JSON.
    pub expected_json: &'static str,
}

impl GoldenVector {
    /// The record this vector describes.
    pub fn record(&self) -> FundRecord {
        FundRecord::new(
            self.fund_id,
            self.fund_name,
            self.investor,
            self.amount,
            self.return_rate,
            self.duration,
        )
    }
}

/// Get all golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "seed fund 1",
            fund_id: "FUND1",
            fund_name: "Equity Growth Fund",
            investor: "Alice",
            amount: 10000.0,
            return_rate: 12.5,
            duration: 12,
            expected_json: r#"{"fundId":"FUND1","name":"Equity Growth Fund","investor":"Alice","amount":10000,"returnRate":12.5,"duration":12}"#,
        },
        GoldenVector {
            name: "seed fund 2",
            fund_id: "FUND2",
            fund_name: "Debt Income Fund",
            investor: "Bob",
            amount: 5000.0,
            return_rate: 8.0,
            duration: 24,
            expected_json: r#"{"fundId":"FUND2","name":"Debt Income Fund","investor":"Bob","amount":5000,"returnRate":8,"duration":24}"#,
        },
        GoldenVector {
            name: "seed fund 3",
            fund_id: "FUND3",
            fund_name: "Balanced Fund",
            investor: "Charlie",
            amount: 20000.0,
            return_rate: 10.0,
            duration: 18,
            expected_json: r#"{"fundId":"FUND3","name":"Balanced Fund","investor":"Charlie","amount":20000,"returnRate":10,"duration":18}"#,
        },
        GoldenVector {
            name: "fractional amount",
            fund_id: "FUND9",
            fund_name: "Tech Fund",
            investor: "Dana",
            amount: 1500.5,
            return_rate: 15.0,
            duration: 6,
            expected_json: r#"{"fundId":"FUND9","name":"Tech Fund","investor":"Dana","amount":1500.5,"returnRate":15,"duration":6}"#,
        },
        GoldenVector {
            name: "negative values",
            fund_id: "FUND10",
            fund_name: "Short Fund",
            investor: "Eve",
            amount: -250.25,
            return_rate: -3.75,
            duration: -1,
            expected_json: r#"{"fundId":"FUND10","name":"Short Fund","investor":"Eve","amount":-250.25,"returnRate":-3.75,"duration":-1}"#,
        },
        GoldenVector {
            name: "escaped characters",
            fund_id: "A&B",
            fund_name: "<Growth> \"Plus\"",
            investor: "Zo\u{eb}\u{2028}",
            amount: 0.1,
            return_rate: 0.0,
            duration: 0,
            expected_json: r#"{"fundId":"A\u0026B","name":"\u003cGrowth\u003e \"Plus\"","investor":"Zoë\u2028","amount":0.1,"returnRate":0,"duration":0}"#,
        },
        GoldenVector {
            name: "small amount in plain decimal",
            fund_id: "FUND11",
            fund_name: "Micro Fund",
            investor: "Finn",
            amount: 0.000005,
            return_rate: 1.5e-6,
            duration: 1,
            expected_json: r#"{"fundId":"FUND11","name":"Micro Fund","investor":"Finn","amount":0.000005,"returnRate":0.0000015,"duration":1}"#,
        },
        GoldenVector {
            name: "integral amount past 2^53",
            fund_id: "FUND12",
            fund_name: "Large Fund",
            investor: "Gus",
            amount: 1_152_921_504_606_846_976.0,
            return_rate: 7.0,
            duration: 120,
            expected_json: r#"{"fundId":"FUND12","name":"Large Fund","investor":"Gus","amount":1152921504606847000,"returnRate":7,"duration":120}"#,
        },
        GoldenVector {
            name: "exponent form from 1e21",
            fund_id: "FUND13",
            fund_name: "Huge Fund",
            investor: "Hana",
            amount: 1e21,
            return_rate: 9.5e-7,
            duration: 240,
            expected_json: r#"{"fundId":"FUND13","name":"Huge Fund","investor":"Hana","amount":1e+21,"returnRate":9.5e-7,"duration":240}"#,
        },
        GoldenVector {
            name: "negative zero",
            fund_id: "FUND14",
            fund_name: "Flat Fund",
            investor: "Ivo",
            amount: -0.0,
            return_rate: -0.0,
            duration: 0,
            expected_json: r#"{"fundId":"FUND14","name":"Flat Fund","investor":"Ivo","amount":-0,"returnRate":-0,"duration":0}"#,
        },
    ]
}

/// Result of checking one vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorCheck {
    /// Vector name.
    pub name: String,
    /// Encoding the record produced the expected bytes.
    pub encodes: bool,
    /// Decoding the expected bytes produced the record.
    pub decodes: bool,
    /// What the encoder actually produced, or the error it returned.
    pub actual: String,
}

impl VectorCheck {
    /// Both directions match.
    pub fn passed(&self) -> bool {
        self.encodes && self.decodes
    }
}

/// Check a single vector in both directions.
pub fn verify_vector(vector: &GoldenVector) -> VectorCheck {
    let record = vector.record();

    let (encodes, actual) = match encode_record(&record) {
        Ok(bytes) => {
            let actual = String::from_utf8_lossy(&bytes).into_owned();
            (actual == vector.expected_json, actual)
        }
        Err(e) => (false, e.to_string()),
    };

    // Compare float bits so the sign of zero counts.
    let decodes = decode_record(vector.expected_json.as_bytes())
        .map(|decoded| {
            decoded == record
                && decoded.amount.to_bits() == record.amount.to_bits()
                && decoded.return_rate.to_bits() == record.return_rate.to_bits()
        })
        .unwrap_or(false);

    VectorCheck {
        name: vector.name.to_string(),
        encodes,
        decodes,
        actual,
    }
}

/// Check every golden vector.
pub fn verify_all_vectors() -> Vec<VectorCheck> {
    all_vectors().iter().map(verify_vector).collect()
}
