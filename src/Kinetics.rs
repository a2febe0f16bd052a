/// eng
/// Kinetics of the catalytic decomposition 2 H2O2 => 2 H2O + O2: Arrhenius rate,
/// stoichiometric split of the converted mass and constants of the reaction.
/// ----------------------------------------------------------------
/// ru
/// Кинетика каталитического разложения 2 H2O2 => 2 H2O + O2: скорость по Аррениусу,
/// стехиометрическое разделение прореагировавшей массы и константы реакции.
pub mod decomposition;
