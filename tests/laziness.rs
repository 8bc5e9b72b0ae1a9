use ironseq::testing::*;
use ironseq::*;

#[test]
fn building_a_pipeline_pulls_nothing() -> anyhow::Result<()> {
    let source = CountingSource::new();
    let nat = source.naturals();
    let other = source.naturals();

    let _mapped = nat
        .select(|n| n * 2)
        .filter(|n| n % 3 == 0)
        .skip(2)
        .take(4)
        .concat(&other)
        .zip(&other, |a, b| a + b);
    let _grouped = nat.group_by(|n| n % 3);
    let _sorted = nat.order_by(|n| *n).then_by_descending(|n| n % 2);
    let _reversed = nat.reverse();
    let _distinct = nat.distinct();
    let _joined = nat.join(&other, |n| *n, |m| *m, |a, b| a + b);
    let _sets = nat.union(&other).intersect(&other).except(&other);
    let _enumerator = nat.get_enumerator();

    assert_eq!(source.pulls(), 0);
    assert_eq!(source.enumerations(), 0);
    Ok(())
}

#[test]
fn each_enumeration_reruns_the_source() -> anyhow::Result<()> {
    let source = CountingSource::new();
    let first_five = source.naturals().take(5);

    assert_sequence_equal(&first_five, &[0, 1, 2, 3, 4]);
    assert_sequence_equal(&first_five, &[0, 1, 2, 3, 4]);
    assert_eq!(source.pulls(), 10);
    assert_eq!(source.enumerations(), 2);
    Ok(())
}

#[test]
fn materialize_pays_for_the_source_once() -> anyhow::Result<()> {
    let source = CountingSource::new();
    let cached = source.naturals().take(5).materialize();
    assert_eq!(source.pulls(), 5);

    assert_sequence_equal(&cached, &[0, 1, 2, 3, 4]);
    assert_sequence_equal(&cached.select(|n| n * 10), &[0, 10, 20, 30, 40]);
    assert_eq!(source.pulls(), 5);
    assert_eq!(source.enumerations(), 1);
    Ok(())
}

#[test]
fn infinite_sources_pull_only_what_is_consumed() -> anyhow::Result<()> {
    let source = CountingSource::new();
    let nat = source.naturals();

    assert_eq!(nat.take(3).to_array(), vec![0, 1, 2]);
    assert_eq!(source.pulls(), 3);

    source.reset();
    assert_eq!(nat.filter(|n| n % 2 == 0).take(3).to_array(), vec![0, 2, 4]);
    assert_eq!(source.pulls(), 5);

    source.reset();
    assert_eq!(nat.first()?, 0);
    assert!(nat.any());
    assert_eq!(source.pulls(), 2);

    source.reset();
    assert_eq!(nat.element_at(4)?, 4);
    assert_eq!(source.pulls(), 5);

    source.reset();
    assert_eq!(nat.take_while(|n| *n < 3).to_array(), vec![0, 1, 2]);
    assert_eq!(source.pulls(), 4);

    source.reset();
    let doubled = nat.select_many(|n| vec![n; 2]).take(5);
    assert_eq!(doubled.to_array(), vec![0, 0, 1, 1, 2]);
    assert_eq!(source.pulls(), 3);

    source.reset();
    let tagged = from_vec(vec!['a', 'b']).zip(&nat, |c, n| (c, n));
    assert_eq!(tagged.to_array(), vec![('a', 0), ('b', 1)]);
    assert_eq!(source.pulls(), 2);
    Ok(())
}

#[test]
fn a_partially_consumed_cursor_stops_pulling() -> anyhow::Result<()> {
    let source = CountingSource::new();
    let mut cursor = source.naturals().select(|n| n + 100).cursor();
    assert_eq!(source.pulls(), 0);

    assert_eq!(cursor.next(), Some(100));
    assert_eq!(cursor.next(), Some(101));
    drop(cursor);
    assert_eq!(source.pulls(), 2);
    Ok(())
}

#[test]
fn concat_starts_the_second_side_only_after_the_first_ends() -> anyhow::Result<()> {
    let left = CountingSource::new();
    let right = CountingSource::new();
    let joined = left.over(vec![1, 2]).concat(&right.over(vec![3]));

    let mut cursor = joined.cursor();
    assert_eq!(cursor.next(), Some(1));
    assert_eq!(cursor.next(), Some(2));
    assert_eq!(right.enumerations(), 0);
    assert_eq!(cursor.next(), Some(3));
    assert_eq!(right.enumerations(), 1);
    assert_eq!(cursor.next(), None);
    Ok(())
}

#[test]
fn eager_operators_wait_for_the_first_pull() -> anyhow::Result<()> {
    let source = CountingSource::new();
    let data = source.over(vec![3, 1, 2]);

    let sorted = data.order_by(|n| *n);
    let grouped = data.group_by(|n| n % 2);
    let reversed = data.reverse();
    let mut cursors = (sorted.cursor(), grouped.cursor(), reversed.cursor());
    assert_eq!(source.enumerations(), 0);

    assert_eq!(cursors.0.next(), Some(1));
    assert_eq!(source.enumerations(), 1);
    assert!(cursors.1.next().is_some());
    assert_eq!(source.enumerations(), 2);
    assert_eq!(cursors.2.next(), Some(2));
    assert_eq!(source.enumerations(), 3);
    Ok(())
}

struct Flaky {
    step: u32,
}

impl Cursor<u32> for Flaky {
    fn next(&mut self) -> Option<u32> {
        self.step += 1;
        (self.step != 2).then_some(self.step)
    }
}

#[test]
fn exhaustion_is_sticky_even_for_misbehaving_cursors() -> anyhow::Result<()> {
    let flaky = Enumerable::from_factory(|| Box::new(Flaky { step: 0 }) as BoxCursor<u32>);

    assert_eq!(flaky.to_array(), vec![1]);
    let mut cursor = flaky.cursor();
    assert_eq!(cursor.next(), Some(1));
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.next(), None);

    let mut finite = from_vec(vec!["x"]).select(str::to_uppercase).cursor();
    assert_eq!(finite.next().as_deref(), Some("X"));
    assert_eq!(finite.next(), None);
    assert_eq!(finite.next(), None);
    Ok(())
}

#[test]
fn an_exhausted_zip_stops_pulling_its_left_side() -> anyhow::Result<()> {
    let source = CountingSource::new();
    let mut cursor = source.naturals().zip(&from_vec(vec!['a']), |n, c| (n, c)).cursor();

    assert_eq!(cursor.next(), Some((0, 'a')));
    assert_eq!(cursor.next(), None);
    assert_eq!(source.pulls(), 2);

    for _ in 0..5 {
        assert_eq!(cursor.next(), None);
    }
    assert_eq!(source.pulls(), 2);
    Ok(())
}
