use crate::GasGenerator::gg_resolver::{GGPropertyResolver, resolve_gg_properties};
use crate::GasGenerator::gg_table::{GGTableSource, gg_table, init_gg_table};
use log::error;
use prettytable::{Table, row};

pub fn gg_examples(task: usize) {
    match task {
        0 => {
            // known temperature, pressure between two tabulated levels
            match resolve_gg_properties(7.5e6, Some(1100.0), None) {
                Ok(gg) => gg.pretty_print(),
                Err(e) => error!("{}", e),
            }
        }
        1 => {
            // known mixture ratio, temperature comes out of the table
            if let Err(e) = init_gg_table(GGTableSource::default()) {
                error!("{}", e);
                return;
            }
            match resolve_gg_properties(12.0e6, None, Some(0.35)) {
                Ok(gg) => gg.pretty_print(),
                Err(e) => error!("{}", e),
            }
        }
        2 => {
            // mixture ratio line at several chamber pressures
            let table = match gg_table() {
                Ok(table) => table,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            };
            let resolver = GGPropertyResolver::new(table);
            let mut out = Table::new();
            out.add_row(row!["P, MPa", "T span, K", "T at MR = 0.3, K", "Cp, J/(kg K)"]);
            for level in table.levels() {
                let (T_min, T_max) = level.temperature_span();
                match resolver.inverse(level.pressure_MPa * 1e6, 0.3) {
                    Ok(gg) => {
                        out.add_row(row![
                            level.pressure_MPa,
                            format!("{}..{}", T_min, T_max),
                            format!("{:.1}", gg.T),
                            format!("{:.1}", gg.Cp)
                        ]);
                    }
                    Err(e) => error!("{}", e),
                }
            }
            out.printstd();
        }
        _ => println!("no gas generator example with number {}", task),
    }
}
