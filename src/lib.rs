#[allow(non_snake_case)]
pub mod CatalyticReactor;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod GasGenerator;
#[allow(non_snake_case)]
pub mod Kinetics;
#[allow(non_snake_case)]
pub mod Thermodynamics;
