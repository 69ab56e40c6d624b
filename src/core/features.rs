use crate::domain::model::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::utils::error::{Result, ServeError};
use serde_json::Value;

/// 將請求 payload 轉成固定順序的特徵向量。
///
/// 欄位順序由 `FEATURE_NAMES` 決定，與 payload 的 key 順序無關；
/// 缺欄位一律報錯，不會補 0。
pub fn build_feature_vector(payload: &Value) -> Result<FeatureVector> {
    let fields = payload
        .as_object()
        .ok_or_else(|| ServeError::InvalidPayload {
            reason: format!("expected a JSON object, got {}", json_type_name(payload)),
        })?;

    let mut values = [0.0; FEATURE_COUNT];
    for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
        let raw = fields
            .get(name)
            .ok_or(ServeError::MissingField { field: name })?;
        *slot = coerce_numeric(raw).ok_or(ServeError::InvalidType {
            field: name,
            found: json_type_name(raw),
        })?;
    }

    Ok(FeatureVector::new(values))
}

/// 已是數值型別的特徵 (例如 CSV 列) 也要符合與 HTTP 請求相同的有限值規則
pub fn ensure_finite(features: &FeatureVector) -> Result<()> {
    match FEATURE_NAMES
        .iter()
        .zip(features.as_slice())
        .find(|(_, value)| !value.is_finite())
    {
        Some((name, _)) => Err(ServeError::InvalidType {
            field: *name,
            found: "non-finite number",
        }),
        None => Ok(()),
    }
}

/// JSON 數字或可解析成有限數值的字串
fn coerce_numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ensure_finite_reports_first_bad_field() {
        let vector = FeatureVector::new([3.0, 2.0, f64::NAN, 4.0, f64::INFINITY]);

        let err = ensure_finite(&vector).unwrap_err();

        assert!(matches!(
            err,
            ServeError::InvalidType {
                field: "livingArea",
                ..
            }
        ));
        assert!(ensure_finite(&FeatureVector::new([3.0, 2.0, 1500.0, 4.0, 5.0])).is_ok());
    }

    fn valid_payload() -> Value {
        json!({
            "bedrooms": 3,
            "bathrooms": 2,
            "livingArea": 1500,
            "condition": 4,
            "schoolsNearby": 5
        })
    }

    #[test]
    fn test_builds_vector_in_fixed_order() {
        let vector = build_feature_vector(&valid_payload()).unwrap();

        assert_eq!(vector.as_slice(), &[3.0, 2.0, 1500.0, 4.0, 5.0]);
    }

    #[test]
    fn test_payload_key_order_does_not_matter() {
        let shuffled: Value = serde_json::from_str(
            r#"{"schoolsNearby": 5, "livingArea": 1500, "condition": 4, "bathrooms": 2, "bedrooms": 3}"#,
        )
        .unwrap();

        assert_eq!(
            build_feature_vector(&shuffled).unwrap(),
            build_feature_vector(&valid_payload()).unwrap()
        );
    }

    #[test]
    fn test_each_missing_field_is_reported_by_name() {
        for name in FEATURE_NAMES {
            let mut payload = valid_payload();
            payload.as_object_mut().unwrap().remove(name);

            match build_feature_vector(&payload) {
                Err(ServeError::MissingField { field }) => assert_eq!(field, name),
                other => panic!("expected MissingField({name}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_each_non_numeric_field_is_reported_by_name() {
        let bad_values = [
            json!(null),
            json!("three"),
            json!({"value": 3}),
            json!([3]),
            json!(true),
        ];

        for name in FEATURE_NAMES {
            for bad in &bad_values {
                let mut payload = valid_payload();
                payload[name] = bad.clone();

                match build_feature_vector(&payload) {
                    Err(ServeError::InvalidType { field, .. }) => assert_eq!(field, name),
                    other => panic!("expected InvalidType({name}) for {bad}, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let mut payload = valid_payload();
        payload["livingArea"] = json!(" 1500.5 ");

        let vector = build_feature_vector(&payload).unwrap();

        assert_eq!(vector.get("livingArea"), Some(1500.5));
    }

    #[test]
    fn test_non_finite_strings_are_rejected() {
        let mut payload = valid_payload();
        payload["condition"] = json!("NaN");

        assert!(matches!(
            build_feature_vector(&payload),
            Err(ServeError::InvalidType {
                field: "condition",
                found: "string"
            })
        ));
    }

    #[test]
    fn test_non_object_payload_is_invalid() {
        let err = build_feature_vector(&json!([3, 2, 1500, 4, 5])).unwrap_err();

        assert!(matches!(err, ServeError::InvalidPayload { .. }));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut payload = valid_payload();
        payload["garage"] = json!("yes");

        assert!(build_feature_vector(&payload).is_ok());
    }
}
