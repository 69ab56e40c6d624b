use crate::core::features::ensure_finite;
use crate::core::service::PredictionService;
use crate::domain::model::{FeatureVector, HouseFeatures};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::{Read, Write};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRow {
    bedrooms: f64,
    bathrooms: f64,
    living_area: f64,
    condition: f64,
    schools_nearby: f64,
    #[serde(rename = "predicted_price")]
    predicted_price: f64,
}

/// 逐列讀取 CSV 特徵並寫出附上 predicted_price 的 CSV，回傳處理筆數。
/// 任何一列失敗就整批中止。
pub fn predict_csv<R: Read, W: Write>(
    service: &PredictionService,
    input: R,
    output: W,
) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    let mut processed = 0;

    for row in reader.deserialize::<HouseFeatures>() {
        let house = row?;
        let features = FeatureVector::from(&house);
        // csv 會把 NaN / inf 解析成 f64，需另外擋下
        ensure_finite(&features)?;
        let result = service.predict(&features)?;

        writer.serialize(BatchRow {
            bedrooms: house.bedrooms,
            bathrooms: house.bathrooms,
            living_area: house.living_area,
            condition: house.condition,
            schools_nearby: house.schools_nearby,
            predicted_price: result.predicted_price,
        })?;
        processed += 1;
    }

    writer.flush()?;
    tracing::debug!("Predicted {} rows", processed);
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::estimator::LinearRegressor;
    use crate::adapters::scaler::StandardScaler;
    use crate::core::artifacts::ArtifactStore;
    use crate::utils::error::ServeError;
    use std::sync::Arc;

    fn service() -> PredictionService {
        PredictionService::new(Arc::new(ArtifactStore::new(
            StandardScaler::identity(5),
            LinearRegressor::new(vec![1.0; 5], 0.0),
        )))
    }

    #[test]
    fn test_appends_predicted_price_column() {
        let input = "bedrooms,bathrooms,livingArea,condition,schoolsNearby\n\
                     3,2,1500,4,5\n\
                     1,1,500,3,0\n";
        let mut output = Vec::new();

        let processed = predict_csv(&service(), input.as_bytes(), &mut output).unwrap();

        assert_eq!(processed, 2);
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "bedrooms,bathrooms,livingArea,condition,schoolsNearby,predicted_price"
        );
        assert_eq!(lines[1], "3.0,2.0,1500.0,4.0,5.0,13626.0");
        assert_eq!(lines[2], "1.0,1.0,500.0,3.0,0.0,4545.0");
    }

    #[test]
    fn test_column_order_in_file_is_irrelevant() {
        let input = "schoolsNearby,condition,livingArea,bathrooms,bedrooms\n5,4,1500,2,3\n";
        let mut output = Vec::new();

        predict_csv(&service(), input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with(",13626.0"));
    }

    #[test]
    fn test_non_numeric_cell_aborts_batch() {
        let input = "bedrooms,bathrooms,livingArea,condition,schoolsNearby\nthree,2,1500,4,5\n";
        let mut output = Vec::new();

        let err = predict_csv(&service(), input.as_bytes(), &mut output).unwrap_err();

        assert!(matches!(err, ServeError::CsvError(_)));
    }

    #[test]
    fn test_nan_cell_is_rejected_like_http_requests() {
        let input = "bedrooms,bathrooms,livingArea,condition,schoolsNearby
3,2,NaN,4,5
";
        let mut output = Vec::new();

        let err = predict_csv(&service(), input.as_bytes(), &mut output).unwrap_err();

        assert!(matches!(
            err,
            ServeError::InvalidType {
                field: "livingArea",
                ..
            }
        ));
    }

    #[test]
    fn test_infinite_cell_is_rejected() {
        let input = "bedrooms,bathrooms,livingArea,condition,schoolsNearby
3,2,1500,inf,5
";
        let mut output = Vec::new();

        let err = predict_csv(&service(), input.as_bytes(), &mut output).unwrap_err();

        assert!(matches!(
            err,
            ServeError::InvalidType {
                field: "condition",
                ..
            }
        ));
    }
}
