use crate::CatalyticReactor::marching_solver::simulate_reactor;
use crate::CatalyticReactor::task_parser::ReactorTask;
use crate::Thermodynamics::IF97data::IF97data;
use crate::Thermodynamics::property_api::{PropertySource, PropertyType, create_property_source};
use log::error;
use prettytable::{Table, row};

pub fn reactor_examples(task: usize) {
    match task {
        0 => {
            // 90% peroxide, 5.8 kg/s through a 170 mm bed at 5 MPa
            let source = IF97data::new();
            match simulate_reactor(0.170, 0.15, 0.001, 0.7, 5.8, 0.90, 293.15, 5.0e6, &source) {
                Ok(solution) => {
                    solution.pretty_print();
                    if let Ok(T_sat) = source.saturation_temperature(solution.P_out) {
                        println!("superheat at outlet: {:.1} K", solution.T_out - T_sat);
                    }
                }
                Err(e) => error!("reactor march failed: {}", e),
            }
        }
        1 => {
            // the same bed described by a task file
            let source = create_property_source(PropertyType::IF97);
            let solution = ReactorTask::from_file("data/reactor_task.json")
                .and_then(|task| task.solve(&source));
            match solution {
                Ok(solution) => solution.pretty_print(),
                Err(e) => error!("{}", e),
            }
        }
        2 => {
            // sweep over peroxide concentration, every run on its own thread
            let source = IF97data::new();
            let fractions = [0.80, 0.85, 0.875, 0.90, 0.95, 0.98];
            let results: Vec<_> = std::thread::scope(|s| {
                let handles: Vec<_> = fractions
                    .iter()
                    .map(|&w| {
                        let source = &source;
                        s.spawn(move || {
                            simulate_reactor(0.170, 0.15, 0.001, 0.7, 5.8, w, 293.15, 5.0e6, source)
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join()).collect()
            });
            let mut table = Table::new();
            table.add_row(row!["w(H2O2)", "T_out, K", "P_out, MPa", "remaining H2O2"]);
            for (w, result) in fractions.iter().zip(results) {
                match result {
                    Ok(Ok(solution)) => {
                        table.add_row(row![
                            w,
                            format!("{:.2}", solution.T_out),
                            format!("{:.4}", solution.P_out / 1e6),
                            format!("{:.3e}", solution.remaining_H2O2_fraction)
                        ]);
                    }
                    Ok(Err(e)) => error!("w = {}: {}", w, e),
                    Err(_) => error!("w = {}: worker panicked", w),
                }
            }
            table.printstd();
        }
        3 => {
            // profiles for plotting elsewhere
            let source = IF97data::new();
            match simulate_reactor(0.170, 0.15, 0.001, 0.7, 5.8, 0.90, 293.15, 5.0e6, &source) {
                Ok(solution) => {
                    let matrix = solution.profiles_matrix();
                    println!("T [K], P [MPa], decomposition: {}", matrix.rows(0, 10));
                    match serde_json::to_string_pretty(&solution.quality) {
                        Ok(json) => println!("{}", json),
                        Err(e) => error!("{}", e),
                    }
                }
                Err(e) => error!("reactor march failed: {}", e),
            }
        }
        _ => println!("no reactor example with number {}", task),
    }
}
