/// contract of the real-fluid property oracle: PropertySource trait, substances, errors
pub mod property_api;
/// production property source: IAPWS-IF97 water/steam, NASA polynomials for oxygen
#[allow(non_snake_case)]
pub mod IF97data;
/// property source with constant values
#[allow(non_snake_case)]
pub mod FixedData;
