use ironseq::testing::*;
use ironseq::*;
use serde_json::json;

#[test]
fn folds_over_employees() -> anyhow::Result<()> {
    let staff = from_vec(sample_employees());

    assert_eq!(staff.count(), 5);
    assert_eq!(staff.count_where(|e| e.boss == "Rob"), 2);
    assert_eq!(staff.sum_by(|e| e.age)?, 185.0);
    assert_eq!(staff.average_by(|e| e.age)?, 37.0);
    assert_eq!(staff.min_by(|e| e.age)?, 29.0);
    assert_eq!(staff.max_by(|e| e.age)?, 52.0);

    let names = staff.aggregate_select(
        String::new(),
        |acc, e| if acc.is_empty() { e.name } else { format!("{acc},{}", e.name) },
        |acc| acc.len(),
    );
    assert_eq!(names, "Tim,Anne,Matt,Sara,Lee".len());
    Ok(())
}

#[test]
fn any_and_all_short_circuit() -> anyhow::Result<()> {
    let source = CountingSource::new();
    let nat = source.naturals();

    assert!(nat.any_where(|n| *n == 3));
    assert_eq!(source.pulls(), 4);

    source.reset();
    assert!(!nat.all(|n| *n < 2));
    assert_eq!(source.pulls(), 3);

    let empty = Enumerable::<i32>::empty();
    assert!(!empty.any());
    assert!(empty.all(|_| false));
    Ok(())
}

#[test]
fn numeric_operators_accept_mixed_widths_and_options() -> anyhow::Result<()> {
    assert_eq!(from_vec(vec![1u8, 2, 3]).sum()?, 6.0);
    assert_eq!(from_vec(vec![-1.5f32, 0.5]).average()?, -0.5);
    assert_eq!(from_vec(vec![Some(4), Some(9)]).max()?, 9.0);

    let err = from_vec(vec![Some(1), None]).sum();
    assert_eq!(
        err,
        Err(QueryError::TypeMismatch {
            operator: "sum",
            found: "None".to_string(),
        })
    );
    Ok(())
}

#[test]
fn json_values_are_read_when_numeric() -> anyhow::Result<()> {
    let mixed = from_vec(vec![json!(2), json!(4.5), json!(-1)]);
    assert_eq!(mixed.sum()?, 5.5);
    assert_eq!(mixed.min()?, -1.0);

    let records = from_vec(vec![json!({"n": 1}), json!({"n": "x"})]);
    let err = records.average_by(|r| r["n"].clone());
    assert_eq!(
        err,
        Err(QueryError::TypeMismatch {
            operator: "average",
            found: "string".to_string(),
        })
    );
    assert!(err.err().is_some_and(|e| e.to_string().contains("average")));
    Ok(())
}

#[test]
fn empty_sequences_in_numeric_operators() -> anyhow::Result<()> {
    let empty = Enumerable::<i64>::empty();
    assert_eq!(empty.sum()?, 0.0);
    assert_eq!(empty.average(), Err(QueryError::EmptySequence));
    assert_eq!(empty.min(), Err(QueryError::EmptySequence));
    assert_eq!(empty.max_by(|n| n * 2), Err(QueryError::EmptySequence));
    Ok(())
}

#[test]
fn first_last_and_their_defaults() -> anyhow::Result<()> {
    let s = from_vec(vec![4, 7, 2, 9]);

    assert_eq!(s.first()?, 4);
    assert_eq!(s.first_where(|n| n % 2 == 1)?, 7);
    assert_eq!(s.last()?, 9);
    assert_eq!(s.last_where(|n| n % 2 == 0)?, 2);

    assert_eq!(s.first_where(|n| *n > 100), Err(QueryError::EmptySequence));
    assert_eq!(s.first_or_default_where(|n| *n > 100), None);
    assert_eq!(s.last_or_default_where(|n| *n < 5), Some(2));

    let empty = Enumerable::<i32>::empty();
    assert_eq!(empty.first(), Err(QueryError::EmptySequence));
    assert_eq!(empty.last(), Err(QueryError::EmptySequence));
    assert_eq!(empty.first_or_default(), None);
    assert_eq!(empty.last_or_default(), None);
    Ok(())
}

#[test]
fn single_requires_exactly_one() -> anyhow::Result<()> {
    let s = from_vec(vec![3, 8, 5]);

    assert_eq!(s.single_where(|n| *n > 6)?, 8);
    assert_eq!(s.single(), Err(QueryError::TooManyElements));
    assert_eq!(s.single_where(|n| *n > 10), Err(QueryError::EmptySequence));
    assert_eq!(s.single_where(|n| n % 2 == 1), Err(QueryError::TooManyElements));
    assert_eq!(from_vec(vec!['z']).single()?, 'z');

    assert_eq!(s.single_or_default(), None);
    assert_eq!(s.single_or_default_where(|n| *n == 5), Some(5));
    assert_eq!(Enumerable::<i32>::empty().single_or_default(), None);
    Ok(())
}

#[test]
fn single_stops_after_the_second_element() -> anyhow::Result<()> {
    let source = CountingSource::new();
    assert_eq!(source.naturals().single(), Err(QueryError::TooManyElements));
    assert_eq!(source.pulls(), 2);
    Ok(())
}

#[test]
fn element_at_bounds() -> anyhow::Result<()> {
    let s = from_vec(vec!["a", "b", "c"]);

    assert_eq!(s.element_at(0)?, "a");
    assert_eq!(s.element_at(2)?, "c");
    assert_eq!(s.element_at(3), Err(QueryError::IndexOutOfRange { index: 3 }));
    assert_eq!(s.element_at(-1), Err(QueryError::IndexOutOfRange { index: -1 }));
    assert_eq!(s.element_at_or_default(1), Some("b"));
    assert_eq!(s.element_at_or_default(7), None);
    assert_eq!(s.element_at_or_default(-4), None);
    Ok(())
}

#[test]
fn contains_and_sequence_equal() -> anyhow::Result<()> {
    let s = from_vec(vec!["Red".to_string(), "Green".to_string()]);

    assert!(s.contains(&"Green".to_string()));
    assert!(!s.contains(&"green".to_string()));
    let ignore_case = FnComparer::new(
        |a: &String, b: &String| a.eq_ignore_ascii_case(b),
        |k: &String| HashKey::from(k.to_ascii_lowercase()),
    );
    assert!(s.contains_with(&"green".to_string(), ignore_case));

    let same = from_vec(vec!["Red".to_string(), "Green".to_string()]);
    let shorter = s.take(1);
    assert!(s.sequence_equal(&same));
    assert!(!s.sequence_equal(&shorter));
    assert!(!shorter.sequence_equal(&s));
    assert!(s.sequence_equal_with(&from_vec(vec!["RED".to_string(), "green".to_string()]), ignore_case));
    assert!(Enumerable::<u8>::empty().sequence_equal(&Enumerable::empty()));
    Ok(())
}
