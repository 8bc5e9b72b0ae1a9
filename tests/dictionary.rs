use ironseq::testing::*;
use ironseq::*;
use std::rc::Rc;

#[test]
fn add_rejects_duplicates_and_replace_overwrites() -> anyhow::Result<()> {
    let mut d = Dictionary::new();
    d.add(5, 5)?;
    assert_eq!(d.add(5, 6), Err(QueryError::DuplicateKey));
    assert_eq!(*d.get(&5)?, 5);

    d.add_or_replace(5, 6);
    assert_eq!(*d.get(&5)?, 6);
    assert_eq!(d.len(), 1);

    assert!(!d.try_add(5, 7));
    assert!(d.try_add(6, 7));
    assert_eq!(d.get(&8), Err(QueryError::KeyNotFound));
    assert_eq!(d.try_get_value(&8), None);
    Ok(())
}

#[test]
fn replace_keeps_insertion_position() -> anyhow::Result<()> {
    let mut d = Dictionary::new();
    for key in ["x", "y", "z"] {
        d.add(key.to_string(), key.len())?;
    }
    d.add_or_replace("x".to_string(), 10);

    assert_sequence_equal(&d.keys(), &["x".to_string(), "y".to_string(), "z".to_string()]);
    assert_sequence_equal(&d.values(), &[10, 1, 1]);
    Ok(())
}

#[test]
fn many_keys_survive_growth_in_insertion_order() -> anyhow::Result<()> {
    let mut d = Dictionary::new();
    let starting = d.capacity();
    for key in (0..200i64).rev() {
        d.add(key, key * key)?;
    }

    assert_eq!(d.len(), 200);
    assert!(d.capacity() > starting);
    assert!(d.capacity().is_power_of_two());
    for key in 0..200i64 {
        assert_eq!(*d.get(&key)?, key * key);
    }
    let firsts: Vec<i64> = d.iter().take(3).map(|(k, _)| *k).collect();
    assert_eq!(firsts, vec![199, 198, 197]);
    Ok(())
}

#[test]
fn constant_hash_comparer_still_finds_every_key() -> anyhow::Result<()> {
    for probe in [ProbeStrategy::Linear, ProbeStrategy::Quadratic] {
        let colliding = FnComparer::new(|a: &u32, b: &u32| a == b, |_: &u32| HashKey::Number(1));
        let options = StoreOptions::default().with_capacity(8).with_probe(probe);
        let mut d = Dictionary::with_options(colliding, options)?;
        for key in 0..40u32 {
            d.add(key, key + 1)?;
        }
        assert_eq!(d.add(17, 0), Err(QueryError::DuplicateKey));
        for key in 0..40u32 {
            assert_eq!(d.try_get_value(&key), Some(&(key + 1)));
        }
        assert!(!d.contains_key(&40));
    }
    Ok(())
}

#[test]
fn options_are_validated() -> anyhow::Result<()> {
    for bad in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
        let options = StoreOptions::default().with_load_factor(bad);
        let built = Dictionary::<i32, i32>::with_options(DefaultComparer::new(), options);
        assert!(matches!(built, Err(QueryError::InvalidArguments(_))), "load factor {bad}");
    }

    for bad in [MAX_INITIAL_CAPACITY + 1, usize::MAX] {
        let options = StoreOptions::default().with_capacity(bad);
        let built = Dictionary::<i32, i32>::with_options(DefaultComparer::new(), options);
        assert!(matches!(built, Err(QueryError::InvalidArguments(_))), "capacity {bad}");
    }
    assert!(StoreOptions::default().with_capacity(MAX_INITIAL_CAPACITY).validate().is_ok());

    let options = StoreOptions::default().with_capacity(3).with_load_factor(0.5);
    let d = Dictionary::<i32, i32>::with_options(DefaultComparer::new(), options)?;
    assert_eq!(d.capacity(), 8);
    assert_eq!(d.options().max_load_factor, 0.5);
    Ok(())
}

#[test]
fn default_comparer_semantics() -> anyhow::Result<()> {
    let mut by_text = Dictionary::new();
    by_text.add("7".to_string(), "string")?;
    assert!(by_text.try_get_value(&"7".to_string()).is_some());

    let mut by_tuple = Dictionary::new();
    by_tuple.add((1, "a".to_string()), 1)?;
    by_tuple.add((1, "b".to_string()), 2)?;
    assert_eq!(by_tuple.add((1, "a".to_string()), 3), Err(QueryError::DuplicateKey));

    let first = Rc::new(vec![1, 2]);
    let twin = Rc::new(vec![1, 2]);
    let comparer = DefaultComparer::new();
    let mut by_ref = Dictionary::with_comparer(comparer.clone());
    by_ref.add(Rc::clone(&first), "first")?;
    by_ref.add(Rc::clone(&twin), "twin")?;
    assert_eq!(by_ref.get(&first)?, &"first");
    assert_eq!(by_ref.get(&twin)?, &"twin");
    assert_eq!(by_ref.add(Rc::clone(&first), "again"), Err(QueryError::DuplicateKey));
    assert_eq!(comparer.identities().len(), 2);
    Ok(())
}

#[test]
fn comparers_agree_with_their_own_equality() -> anyhow::Result<()> {
    let staff = sample_employees();
    let mut copy = staff[1].clone();

    let mut by_value = Dictionary::with_comparer(JsonComparer);
    by_value.add(staff[1].clone(), "anne")?;
    assert!(by_value.contains_key(&copy));
    copy.age += 1;
    assert!(!by_value.contains_key(&copy));

    let mut by_eq = Dictionary::with_comparer(EqHashComparer);
    for e in &staff {
        by_eq.add(e.clone(), e.id)?;
    }
    assert_eq!(by_eq.get(&staff[4])?, &5);
    Ok(())
}

#[test]
fn seeding_from_pairs() -> anyhow::Result<()> {
    let d = Dictionary::from_pairs([("a", 1), ("b", 2)])?;
    assert_eq!(d.len(), 2);
    assert_eq!(d.to_enumerable().to_array(), vec![("a", 1), ("b", 2)]);

    assert_eq!(
        Dictionary::from_pairs([("a", 1), ("a", 2)]).err(),
        Some(QueryError::DuplicateKey)
    );

    let lookup = Dictionary::from_pairs([(1, 'x')])?.into_lookup();
    assert_eq!(lookup.get(&1)?, &'x');
    assert_eq!(lookup.iter().count(), 1);
    Ok(())
}

#[test]
fn mutable_access_and_views() -> anyhow::Result<()> {
    let mut d = Dictionary::from_pairs([("hits", 0), ("misses", 0)])?;
    if let Some(hits) = d.try_get_value_mut(&"hits") {
        *hits += 3;
    }
    let pairs: Vec<(&&str, &i32)> = (&d).into_iter().collect();
    assert_eq!(pairs, vec![(&"hits", &3), (&"misses", &0)]);

    let snapshot = d.values();
    d.add("errors", 1)?;
    assert_sequence_equal(&snapshot, &[3, 0]);
    assert_sequence_len(&d.keys(), 3);
    Ok(())
}

#[test]
fn lookups_leave_the_identity_table_alone() -> anyhow::Result<()> {
    let comparer = DefaultComparer::new();
    let mut d = Dictionary::with_comparer(comparer.clone());
    let stored = Rc::new(0);
    d.add(Rc::clone(&stored), "stored")?;

    for i in 0..10_000 {
        let stranger = Rc::new(i);
        assert!(!d.contains_key(&stranger));
        assert_eq!(d.try_get_value(&stranger), None);
        assert_eq!(d.get(&stranger), Err(QueryError::KeyNotFound));
    }
    assert_eq!(comparer.identities().len(), 1);
    assert!(d.contains_key(&Rc::clone(&stored)));
    Ok(())
}

#[test]
fn dead_allocations_are_swept_from_the_identity_table() -> anyhow::Result<()> {
    let comparer = DefaultComparer::new();
    let kept = Rc::new(-1);
    let mut long_lived = Dictionary::with_comparer(comparer.clone());
    long_lived.add(Rc::clone(&kept), ())?;

    for i in 0..1_000 {
        let mut scratch = Dictionary::with_comparer(comparer.clone());
        scratch.add(Rc::new(i), i)?;
    }
    assert!(comparer.identities().len() < 200);
    assert!(long_lived.contains_key(&kept));
    Ok(())
}
