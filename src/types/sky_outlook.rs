//! Defines the `SkyOutlook` classification shown on daily forecast cards and
//! the `TemperatureBand` used by the temperature gauge.

use std::fmt;

/// A coarse sky outlook derived from forecast temperature and humidity.
///
/// Forecasters only predict temperature, humidity, wind speed and pressure, so
/// the outlook is a heuristic over the first two rather than an observed
/// condition code.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SkyOutlook {
    /// Temperature above 32 °C.
    Sunny,
    /// Temperature above 25 °C, up to 32 °C.
    PartlyCloudy,
    /// Temperature of 25 °C or less with humidity above 70 %.
    Rainy,
    /// Everything else.
    MostlySunny,
}

impl SkyOutlook {
    /// Classifies a forecast day.
    ///
    /// Temperature thresholds are checked before humidity, so a hot humid day
    /// is still `Sunny`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weather_outlook::SkyOutlook;
    ///
    /// assert_eq!(SkyOutlook::classify(33.0, 90.0), SkyOutlook::Sunny);
    /// assert_eq!(SkyOutlook::classify(28.0, 40.0), SkyOutlook::PartlyCloudy);
    /// assert_eq!(SkyOutlook::classify(18.0, 80.0), SkyOutlook::Rainy);
    /// assert_eq!(SkyOutlook::classify(18.0, 50.0), SkyOutlook::MostlySunny);
    /// ```
    pub fn classify(temperature: f64, humidity: f64) -> Self {
        if temperature > 32.0 {
            SkyOutlook::Sunny
        } else if temperature > 25.0 {
            SkyOutlook::PartlyCloudy
        } else if humidity > 70.0 {
            SkyOutlook::Rainy
        } else {
            SkyOutlook::MostlySunny
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SkyOutlook::Sunny => "☀️",
            SkyOutlook::PartlyCloudy => "⛅",
            SkyOutlook::Rainy => "🌧️",
            SkyOutlook::MostlySunny => "🌤️",
        }
    }
}

impl fmt::Display for SkyOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkyOutlook::Sunny => "Sunny",
            SkyOutlook::PartlyCloudy => "Partly cloudy",
            SkyOutlook::Rainy => "Rainy",
            SkyOutlook::MostlySunny => "Mostly sunny",
        };
        write!(f, "{}", label)
    }
}

/// Colour band of the temperature gauge.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TemperatureBand {
    /// Below 25 °C.
    Cool,
    /// 25 °C up to 35 °C.
    Warm,
    /// 35 °C and above.
    Hot,
}

impl TemperatureBand {
    pub fn from_celsius(value: f64) -> Self {
        if value < 25.0 {
            TemperatureBand::Cool
        } else if value < 35.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Hot
        }
    }

    /// Nominal `[lower, upper)` range of the band on the gauge axis.
    pub fn range(&self) -> (f64, f64) {
        match self {
            TemperatureBand::Cool => (0.0, 25.0),
            TemperatureBand::Warm => (25.0, 35.0),
            TemperatureBand::Hot => (35.0, 50.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        // Thresholds are strict
        assert_eq!(SkyOutlook::classify(32.0, 10.0), SkyOutlook::PartlyCloudy);
        assert_eq!(SkyOutlook::classify(25.0, 70.0), SkyOutlook::MostlySunny);
        assert_eq!(SkyOutlook::classify(25.0, 70.1), SkyOutlook::Rainy);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(TemperatureBand::from_celsius(-3.0), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::from_celsius(25.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::from_celsius(34.9), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::from_celsius(35.0), TemperatureBand::Hot);
        assert_eq!(TemperatureBand::Warm.range(), (25.0, 35.0));
    }
}
