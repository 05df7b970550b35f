pub mod weather;

pub use weather::{FixedWeather, WeatherClient, WeatherError, WeatherProvider};
