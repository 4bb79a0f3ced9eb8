use clubsim::{
    replay_str, run_file, ClubError, ClubState, Header, JsonLinesSink, LineSink, Output,
    ReplayConfig, SimulationEngine, Time, WaitingOrder,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn minutes(time: Time) -> u32 {
    u32::from(time.hour) * 60 + u32::from(time.minute)
}

#[test]
fn test_sample_file_matches_expected_output() {
    let mut sink = LineSink::new(Vec::new());
    let state = run_file(data_file("sample.txt"), ReplayConfig::default(), &mut sink).unwrap();

    let expected = std::fs::read_to_string(data_file("sample.expected")).unwrap();
    let actual = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(actual, expected);

    assert!(state.waiting.is_empty());
    assert!(state.club.tables().all(|(_, table)| !table.is_occupied()));
}

#[test]
fn test_missing_file_is_io_error() {
    let mut sink: Vec<Output> = Vec::new();
    let result = run_file(data_file("does-not-exist.txt"), ReplayConfig::default(), &mut sink);
    assert!(matches!(result, Err(ClubError::Io(_))));
    assert!(sink.is_empty());
}

#[test]
fn test_lexicographic_waiting_order_changes_who_is_seated() {
    let input = "\
1
09:00 19:00
10
09:00 1 zed
09:00 2 zed 1
09:05 1 mike
09:06 1 alice
10:00 4 zed
";
    let seated = |order: WaitingOrder| {
        let mut records: Vec<Output> = Vec::new();
        replay_str(input, ReplayConfig::new().with_waiting_order(order), &mut records).unwrap();
        records
            .iter()
            .map(ToString::to_string)
            .find(|line| line.starts_with("10:00 12"))
    };

    assert_eq!(seated(WaitingOrder::Insertion).as_deref(), Some("10:00 12 mike 1"));
    assert_eq!(seated(WaitingOrder::Lexicographic).as_deref(), Some("10:00 12 alice 1"));
}

#[test]
fn test_json_lines_replay() {
    let input = "1\n09:00 19:00\n10\n09:00 1 A\n09:00 2 A 1\n";
    let mut sink = JsonLinesSink::new(Vec::new());
    replay_str(input, ReplayConfig::default(), &mut sink).unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let types: Vec<&str> = records.iter().map(|r| r["type"].as_str().unwrap()).collect();
    assert_eq!(
        types,
        vec!["opened", "echo", "echo", "closed", "notice", "report"]
    );
    assert_eq!(records[4]["notice"], "client_left");
    assert_eq!(records[4]["name"], "A");
    assert_eq!(records[5]["revenue"], 110);
    assert_eq!(records[5]["occupied_for"], "10:00");
}

#[test]
fn test_header_reparse_builds_identical_state() {
    let header_a = Header::parse("4", "08:00 23:00", "15").unwrap();
    let header_b = Header::parse("4", "08:00 23:00", "15").unwrap();
    assert_eq!(
        ClubState::from_header(&header_a, WaitingOrder::Insertion),
        ClubState::from_header(&header_b, WaitingOrder::Insertion)
    );
}

/// Random chronological event log over a small name pool
fn random_events(rng: &mut StdRng, tables: usize, count: usize) -> Vec<String> {
    let names = ["ann", "bob", "cid", "dan", "eve", "fay", "gus"];
    let mut clock = 8 * 60 + 30;
    let mut lines = Vec::with_capacity(count);

    for _ in 0..count {
        clock += rng.gen_range(0..25);
        if clock >= 23 * 60 + 59 {
            break;
        }
        let time = format!("{:02}:{:02}", clock / 60, clock % 60);
        let name = names[rng.gen_range(0..names.len())];
        let line = match rng.gen_range(1..=4) {
            1 => format!("{} 1 {}", time, name),
            2 => format!("{} 2 {} {}", time, name, rng.gen_range(1..=tables)),
            3 => format!("{} 3 {}", time, name),
            _ => format!("{} 4 {}", time, name),
        };
        lines.push(line);
    }
    lines
}

/// Occupancy matches the occupant, nobody waits while seated, and table
/// totals never decrease.
fn assert_table_rules(state: &ClubState, previous: &mut [(u64, u32)], context: &str) {
    for (index, table) in state.club.tables() {
        assert_eq!(
            table.is_occupied(),
            table.occupant().map_or(false, |name| !name.is_empty()),
            "{}",
            context
        );
        if let Some(name) = table.occupant() {
            assert!(!state.waiting.contains(name), "{} waits while seated: {}", name, context);
        }

        let now = (table.revenue(), minutes(table.occupied_for()));
        let before = previous[index - 1];
        assert!(now.0 >= before.0 && now.1 >= before.1, "table {}: {}", index, context);
        previous[index - 1] = now;
    }
}

#[test]
fn test_invariants_hold_for_random_logs() {
    for seed in 0..40u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let tables = rng.gen_range(1..=4);
        let header = Header::parse(&tables.to_string(), "09:00 21:00", "7").unwrap();
        let order = if seed % 2 == 0 {
            WaitingOrder::Insertion
        } else {
            WaitingOrder::Lexicographic
        };

        let mut records: Vec<Output> = Vec::new();
        let mut engine = SimulationEngine::new(
            &header,
            ReplayConfig::new().with_waiting_order(order),
            &mut records,
        )
        .unwrap();

        let mut previous: Vec<(u64, u32)> = vec![(0, 0); tables];
        for line in random_events(&mut rng, tables, 120) {
            engine.step(&line).unwrap();
            let context = format!("seed {} after {:?}", seed, line);
            assert_table_rules(engine.state(), &mut previous, &context);

            // A seated client asks for another table at the same time.
            let seated: Vec<String> = engine
                .state()
                .club
                .tables()
                .filter_map(|(_, table)| table.occupant().map(str::to_string))
                .collect();
            if !seated.is_empty() && rng.gen_bool(0.3) {
                let name = &seated[rng.gen_range(0..seated.len())];
                let again = format!("{} 2 {} {}", &line[..5], name, rng.gen_range(1..=tables));
                engine.step(&again).unwrap();
                let context = format!("seed {} after {:?}", seed, again);
                assert_table_rules(engine.state(), &mut previous, &context);
            }
        }

        let (state, _) = engine.finish().unwrap();
        assert!(state.club.tables().all(|(_, table)| !table.is_occupied()));
        for (index, table) in state.club.tables() {
            assert!(table.revenue() >= previous[index - 1].0);
        }
    }
}
