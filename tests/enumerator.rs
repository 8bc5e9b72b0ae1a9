use ironseq::testing::*;
use ironseq::*;

#[test]
fn lifecycle_over_two_elements() -> anyhow::Result<()> {
    let mut e = from_vec(vec![1, 2]).get_enumerator();
    assert_eq!(e.state(), EnumeratorState::NotStarted);
    assert_eq!(
        e.current().err(),
        Some(QueryError::InvalidEnumerationState(EnumeratorState::NotStarted))
    );

    assert!(e.move_next());
    assert_eq!(e.state(), EnumeratorState::Active);
    assert_eq!(*e.current()?, 1);
    assert!(e.move_next());
    assert_eq!(*e.current()?, 2);
    assert!(!e.move_next());
    assert_eq!(e.state(), EnumeratorState::Finished);
    assert_eq!(
        e.current().err(),
        Some(QueryError::InvalidEnumerationState(EnumeratorState::Finished))
    );
    Ok(())
}

#[test]
fn finished_is_terminal_until_reset() -> anyhow::Result<()> {
    let mut e = from_vec(vec!['x']).get_enumerator();
    assert!(e.move_next());
    assert!(!e.move_next());
    assert!(!e.move_next());
    assert!(!e.move_next());
    assert_eq!(e.state(), EnumeratorState::Finished);

    e.reset();
    assert_eq!(e.state(), EnumeratorState::NotStarted);
    assert!(e.current().is_err());
    assert!(e.move_next());
    assert_eq!(*e.current()?, 'x');
    Ok(())
}

#[test]
fn reset_replays_the_same_sequence() -> anyhow::Result<()> {
    let mut e = from_vec(vec![1, 2]).get_enumerator();
    let mut passes = Vec::new();
    for _ in 0..2 {
        let mut seen = Vec::new();
        while e.move_next() {
            seen.push(*e.current()?);
        }
        passes.push(seen);
        e.reset();
    }
    assert_eq!(passes, vec![vec![1, 2], vec![1, 2]]);
    Ok(())
}

#[test]
fn reset_restarts_the_source_mid_enumeration() -> anyhow::Result<()> {
    let source = CountingSource::new();
    let mut e = source.naturals().get_enumerator();
    assert_eq!(source.enumerations(), 0);

    assert!(e.move_next());
    assert!(e.move_next());
    assert_eq!(*e.current()?, 1);
    assert_eq!(source.enumerations(), 1);

    e.reset();
    assert!(e.move_next());
    assert_eq!(*e.current()?, 0);
    assert_eq!(source.enumerations(), 2);
    assert_eq!(source.pulls(), 3);
    Ok(())
}

#[test]
fn empty_sequence_finishes_on_the_first_move() -> anyhow::Result<()> {
    let mut e = Enumerable::<String>::empty().get_enumerator();
    assert!(!e.move_next());
    assert_eq!(e.state(), EnumeratorState::Finished);
    assert!(e.current().is_err());
    Ok(())
}

#[test]
fn state_error_messages() -> anyhow::Result<()> {
    let before = QueryError::InvalidEnumerationState(EnumeratorState::NotStarted);
    let after = QueryError::InvalidEnumerationState(EnumeratorState::Finished);
    assert!(before.to_string().contains("not started"));
    assert!(after.to_string().contains("finished"));
    Ok(())
}
