use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DeskError;

/// A discount code as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id", deserialize_with = "super::wire::id")]
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub discount_amount: f64,
    pub min_order_amount: f64,
    #[serde(deserialize_with = "super::wire::date")]
    pub expiry_date: NaiveDate,
}

impl Coupon {
    /// Expired offers are kept; consumers should just treat them as off.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date <= self.expiry_date
    }
}

/// Offer form as staff fill it in. Any field may still be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponDraft {
    pub code: String,
    pub description: String,
    pub discount_amount: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub expiry_date: Option<NaiveDate>,
}

/// Body of the create and update coupon calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPayload {
    pub code: String,
    pub description: String,
    pub discount_amount: f64,
    pub min_order_amount: f64,
    #[serde(serialize_with = "serialize_day")]
    pub expiry_date: NaiveDate,
}

fn serialize_day<S: serde::Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

impl CouponDraft {
    /// Turns the form into a request body, or says which field is wrong.
    pub fn validate(&self) -> Result<CouponPayload, DeskError> {
        let code = self.code.trim();
        let description = self.description.trim();
        let (Some(discount_amount), Some(min_order_amount), Some(expiry_date)) =
            (self.discount_amount, self.min_order_amount, self.expiry_date)
        else {
            return Err(DeskError::ValidationError("Please fill all fields".to_string()));
        };
        if code.is_empty() || description.is_empty() {
            return Err(DeskError::ValidationError("Please fill all fields".to_string()));
        }
        if !(discount_amount > 0.0) {
            return Err(DeskError::ValidationError(format!(
                "Discount amount must be positive, got {discount_amount}"
            )));
        }
        if !(min_order_amount > 0.0) {
            return Err(DeskError::ValidationError(format!(
                "Minimum order amount must be positive, got {min_order_amount}"
            )));
        }
        Ok(CouponPayload {
            code: code.to_string(),
            description: description.to_string(),
            discount_amount,
            min_order_amount,
            expiry_date,
        })
    }
}

impl From<&Coupon> for CouponDraft {
    fn from(coupon: &Coupon) -> Self {
        Self {
            code: coupon.code.clone(),
            description: coupon.description.clone(),
            discount_amount: Some(coupon.discount_amount),
            min_order_amount: Some(coupon.min_order_amount),
            expiry_date: Some(coupon.expiry_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled_draft() -> CouponDraft {
        CouponDraft {
            code: "FEAST50".to_string(),
            description: "Flat 50 off".to_string(),
            discount_amount: Some(50.0),
            min_order_amount: Some(299.0),
            expiry_date: Some(day(2025, 4, 30)),
        }
    }

    #[test]
    fn decodes_mongo_style_coupon() {
        let json = r#"{
            "_id": "66f0c0ffee",
            "code": "FEAST50",
            "description": "Flat 50 off",
            "discountAmount": 50,
            "minOrderAmount": 299,
            "expiryDate": "2025-04-30T00:00:00.000Z"
        }"#;
        let coupon: Coupon = serde_json::from_str(json).unwrap();
        assert_eq!(coupon.id, "66f0c0ffee");
        assert_eq!(coupon.expiry_date, day(2025, 4, 30));
        assert!(coupon.is_active_on(day(2025, 4, 30)));
        assert!(!coupon.is_active_on(day(2025, 5, 1)));
    }

    #[test]
    fn payload_uses_camel_case_and_plain_dates() {
        let payload = filled_draft().validate().unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["discountAmount"], 50.0);
        assert_eq!(json["minOrderAmount"], 299.0);
        assert_eq!(json["expiryDate"], "2025-04-30");
    }

    #[test]
    fn missing_fields_are_rejected() {
        let mut draft = filled_draft();
        draft.expiry_date = None;
        assert_eq!(
            draft.validate(),
            Err(DeskError::ValidationError("Please fill all fields".to_string()))
        );

        let mut draft = filled_draft();
        draft.code = "   ".to_string();
        assert!(matches!(draft.validate(), Err(DeskError::ValidationError(_))));
    }

    #[test]
    fn amounts_must_be_positive() {
        let mut draft = filled_draft();
        draft.discount_amount = Some(0.0);
        assert!(matches!(draft.validate(), Err(DeskError::ValidationError(_))));

        let mut draft = filled_draft();
        draft.min_order_amount = Some(f64::NAN);
        assert!(matches!(draft.validate(), Err(DeskError::ValidationError(_))));
    }
}
