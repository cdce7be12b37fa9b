use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use labot_core::{Algorithm, Cell, CellCoord, Direction, Event, GridError};
use labot_system_navigation::{Session, SessionError, Status};
use labot_world::Grid;

const SAMPLE: &str = "\
1 1 1 1 1
1 S 0 0 1
1 1 1 0 1
1 0 0 0 1
1 0 1 Z 1
1 1 1 1 1
";

const COMB: &str = "\
1 1 1 1 1 1 1
1 S 0 0 0 0 1
1 1 1 0 1 0 1
1 0 0 0 1 0 1
1 0 1 1 1 0 1
1 0 0 Z 1 0 1
1 1 1 1 1 1 1
";

const RING: &str = "\
1 1 1 1 1
1 S 0 0 1
1 0 1 0 1
1 0 0 0 1
1 1 1 1 1
1 Z 1 1 1
";

const ENCLOSED: &str = "\
1 1 1 1
1 S 1 Z
1 1 1 1
";

fn grid(source: &str) -> Grid {
    source.parse().expect("test maze parses")
}

fn session(source: &str, algorithm: Algorithm) -> Session {
    Session::start(grid(source), algorithm).expect("session starts")
}

fn probe(direction: Direction, blocked: bool) -> Event {
    Event::Probing { direction, blocked }
}

fn moved(row: u32, column: u32, heading: Direction) -> Event {
    Event::Moved {
        cell: CellCoord::new(row, column),
        heading,
    }
}

fn safety_bound(grid: &Grid) -> usize {
    4 * grid.rows() as usize * grid.columns() as usize
}

#[test]
fn left_hand_trace_through_sample_maze() {
    let mut session = session(SAMPLE, Algorithm::LeftHand);
    let bound = safety_bound(session.grid());

    let outcome = session.run(bound);

    assert_eq!(outcome.status, Status::Arrived);
    assert_eq!(
        outcome.events,
        vec![
            probe(Direction::North, true),
            probe(Direction::East, false),
            moved(1, 2, Direction::East),
            probe(Direction::North, true),
            probe(Direction::East, false),
            moved(1, 3, Direction::East),
            probe(Direction::North, true),
            probe(Direction::East, true),
            probe(Direction::South, false),
            moved(2, 3, Direction::South),
            probe(Direction::East, true),
            probe(Direction::South, false),
            moved(3, 3, Direction::South),
            probe(Direction::East, true),
            probe(Direction::South, false),
            moved(4, 3, Direction::South),
            Event::Arrived {
                cell: CellCoord::new(4, 3)
            },
        ]
    );
    assert_eq!(session.moves(), 5);
    assert_eq!(session.steps(), 17);
}

#[test]
fn right_hand_opens_with_right_probe() {
    let mut session = session(SAMPLE, Algorithm::RightHand);

    let opening: Vec<_> = (0..3).map(|_| session.step()).collect();

    assert_eq!(
        opening,
        vec![
            probe(Direction::South, true),
            probe(Direction::East, false),
            moved(1, 2, Direction::East),
        ]
    );
}

#[test]
fn both_hands_reach_goal_within_safety_bound() {
    for source in [SAMPLE, COMB] {
        let goal = grid(source).find(Cell::Goal).expect("goal cell");
        for algorithm in [Algorithm::LeftHand, Algorithm::RightHand] {
            let mut session = session(source, algorithm);
            let bound = safety_bound(session.grid());

            let outcome = session.run(bound);

            assert_eq!(
                outcome.status,
                Status::Arrived,
                "{algorithm} did not arrive within {bound} steps"
            );
            assert_eq!(outcome.events.last(), Some(&Event::Arrived { cell: goal }));
            assert_eq!(session.robot().position, goal);
        }
    }
}

#[test]
fn default_maze_is_solved_by_both_hands() {
    for algorithm in [Algorithm::LeftHand, Algorithm::RightHand] {
        let mut session =
            Session::start(Grid::default_maze(), algorithm).expect("default maze starts");
        let bound = safety_bound(session.grid());

        let outcome = session.run(bound);

        assert_eq!(outcome.status, Status::Arrived, "{algorithm} failed");
        assert_eq!(outcome.moves(), 15);
    }
}

#[test]
fn replays_are_deterministic() {
    for algorithm in [Algorithm::LeftHand, Algorithm::RightHand] {
        let first = session(COMB, algorithm).run(500);
        let second = session(COMB, algorithm).run(500);

        assert_eq!(first, second, "replay diverged between runs");
        assert_eq!(fingerprint(&first.events), fingerprint(&second.events));
    }
}

#[test]
fn hands_take_different_routes() {
    let left = session(COMB, Algorithm::LeftHand).run(500);
    let right = session(COMB, Algorithm::RightHand).run(500);

    assert_ne!(fingerprint(&left.events), fingerprint(&right.events));
    assert_eq!(left.moves(), 22);
    assert_eq!(right.moves(), 10);
}

#[test]
fn enclosed_start_is_stuck_without_moving() {
    let mut session = session(ENCLOSED, Algorithm::LeftHand);

    let outcome = session.run(100);

    assert_eq!(outcome.status, Status::Stuck);
    assert_eq!(outcome.moves(), 0);
    assert_eq!(
        outcome.events.last(),
        Some(&Event::Stuck {
            cell: CellCoord::new(1, 1)
        })
    );
    assert!(session.is_terminal());
}

#[test]
fn terminal_event_repeats_after_completion() {
    let mut session = session(SAMPLE, Algorithm::LeftHand);
    let _ = session.run(200);
    let steps = session.steps();
    let robot = *session.robot();

    let arrived = Event::Arrived {
        cell: CellCoord::new(4, 3),
    };
    assert_eq!(session.step(), arrived);
    assert_eq!(session.step(), arrived);
    assert_eq!(session.steps(), steps);
    assert_eq!(*session.robot(), robot);
}

#[test]
fn wall_islands_keep_the_robot_circling() {
    let mut session = session(RING, Algorithm::LeftHand);
    let start = session.robot().position;

    let outcome = session.run(200);

    assert_eq!(outcome.status, Status::Exhausted);
    assert!(!session.is_terminal());
    let revisits = outcome
        .events
        .iter()
        .filter(|event| matches!(event, Event::Moved { cell, .. } if *cell == start))
        .count();
    assert!(revisits > 1, "robot should keep returning to the start cell");
}

#[test]
fn session_requires_a_goal() {
    let result = Session::start(grid("1 1 1\n1 S 0\n"), Algorithm::LeftHand);
    assert_eq!(
        result.err(),
        Some(SessionError::Grid(GridError::NotFound(Cell::Goal)))
    );
}

#[test]
fn session_requires_a_start() {
    let grid = Grid::from_rows(vec![vec![Cell::Open, Cell::Goal]]).expect("rectangular grid");
    let result = Session::start(grid, Algorithm::RightHand);
    assert_eq!(
        result.err(),
        Some(SessionError::Grid(GridError::NotFound(Cell::Start)))
    );
}

#[test]
fn robot_starts_idle_facing_east() {
    let session = session(SAMPLE, Algorithm::LeftHand);
    let robot = session.robot();

    assert_eq!(robot.position, CellCoord::new(1, 1));
    assert_eq!(robot.heading, Direction::East);
    assert_eq!(robot.probing, None);
    assert!(!session.is_terminal());
}

fn fingerprint(events: &[Event]) -> u64 {
    let mut hasher = DefaultHasher::new();
    events.hash(&mut hasher);
    hasher.finish()
}
