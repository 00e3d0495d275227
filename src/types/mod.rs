pub mod sky_outlook;
pub mod weather_variable;
