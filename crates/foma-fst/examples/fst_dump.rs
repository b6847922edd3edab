// Load a text FST and print its alphabet, states and arcs.
//
// Usage: cargo run -p foma-fst --example fst_dump -- path/to/net.foma.txt
// Set RUST_LOG=debug to see section changes.

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: fst_dump <net.foma.txt>");
        return ExitCode::from(2);
    };

    let fst = match foma_fst::parse_file(&path) {
        Ok(fst) => fst,
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{path}: {} symbols, {} states, {} arcs, {} accepting",
        fst.sigma().len(),
        fst.states().len(),
        fst.arcs().len(),
        fst.accepting_states().len(),
    );

    let graphemes: Vec<&str> = fst.graphemes().map(|s| s.text).collect();
    println!("graphemes: {}", graphemes.join(" "));
    let multichar: Vec<&str> = fst.multichar_symbols().map(|s| s.text).collect();
    println!("multichar: {}", multichar.join(" "));
    for (id, flag) in fst.sigma().flag_diacritics() {
        println!(
            "flag {id}: {} {} {}",
            flag.op.letter(),
            flag.feature,
            flag.value.unwrap_or("-")
        );
    }

    for &state in fst.states() {
        let marker = if fst.is_accepting(state) { " (final)" } else { "" };
        println!("state {state}{marker}");
        for arc in fst.arcs_from(state) {
            println!("  {}", fst.display_arc(arc));
        }
    }

    ExitCode::SUCCESS
}
