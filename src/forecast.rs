//! Next-period satisfaction forecast.
//!
//! The estimate is the series mean plus a fixed bias. It is a heuristic, not a
//! fitted trend model, and the bias is not tunable.

use thiserror::Error;

use crate::models::{TrendDirection, TrendSeries};

pub const FORECAST_BIAS: f64 = 2.0;

/// Points of movement between the first and last period that still count as stable.
pub const STABLE_TOLERANCE: f64 = 5.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForecastError {
    #[error("cannot forecast from an empty series")]
    EmptySeries,
}

pub fn forecast(series: &[f64]) -> Result<f64, ForecastError> {
    if series.is_empty() {
        return Err(ForecastError::EmptySeries);
    }

    let mean = series.iter().sum::<f64>() / series.len() as f64;
    Ok(mean + FORECAST_BIAS)
}

pub fn forecast_series(series: &TrendSeries) -> Result<f64, ForecastError> {
    forecast(&series.scores())
}

pub fn trend_direction(series: &[f64]) -> Result<TrendDirection, ForecastError> {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Err(ForecastError::EmptySeries);
    };

    let delta = last - first;
    let direction = if delta > STABLE_TOLERANCE {
        TrendDirection::Rising
    } else if delta < -STABLE_TOLERANCE {
        TrendDirection::Falling
    } else {
        TrendDirection::Stable
    };
    Ok(direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn monthly_scores_forecast() {
        let value = forecast(&[72.0, 75.0, 78.0, 74.0, 79.0, 76.0]).unwrap();
        assert!((value - 77.666_666_666).abs() < 1e-6);
        assert_eq!(format!("{value:.2}"), "77.67");
        assert_eq!(format!("{value:.1}"), "77.7");
    }

    #[test]
    fn empty_series_fails() {
        assert_eq!(forecast(&[]), Err(ForecastError::EmptySeries));
        assert_eq!(trend_direction(&[]), Err(ForecastError::EmptySeries));
    }

    #[test]
    fn single_value_adds_bias() {
        assert_eq!(forecast(&[50.0]).unwrap(), 52.0);
    }

    #[test]
    fn forecast_series_uses_scores() {
        let series = TrendSeries::from_pairs(vec![("Jan", 10.0), ("Feb", 20.0)]);
        assert_eq!(forecast_series(&series).unwrap(), 17.0);
        assert_eq!(
            forecast_series(&TrendSeries::default()),
            Err(ForecastError::EmptySeries)
        );
    }

    #[test]
    fn direction_uses_first_and_last() {
        assert_eq!(
            trend_direction(&[72.0, 75.0, 78.0, 74.0, 79.0, 76.0]).unwrap(),
            TrendDirection::Stable
        );
        assert_eq!(trend_direction(&[70.0, 75.0]).unwrap(), TrendDirection::Stable);
        assert_eq!(trend_direction(&[70.0, 76.0]).unwrap(), TrendDirection::Rising);
        assert_eq!(trend_direction(&[80.0, 60.0]).unwrap(), TrendDirection::Falling);
    }

    proptest! {
        #[test]
        fn forecast_is_mean_plus_bias(values in prop::collection::vec(-1000.0f64..1000.0, 1..50)) {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            let value = forecast(&values).unwrap();
            prop_assert!((value - (mean + FORECAST_BIAS)).abs() < 1e-9);
        }
    }
}
