use PeroxideReactor::Examples::gg_examples::gg_examples;
use PeroxideReactor::Examples::reactor_examples::reactor_examples;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

pub fn main() {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    // 0..=3 reactor, 10..=12 gas generator
    let task: usize = 0;
    match task {
        0..=9 => reactor_examples(task),
        _ => gg_examples(task - 10),
    }
}
