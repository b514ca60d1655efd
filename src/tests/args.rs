use std::sync::Arc;

use crate::{args, Arg, Args};

#[test]
fn empty_arguments() {
    let args = args![];
    assert!(args.is_empty());
    assert_eq!(args.len(), 0);
    assert_eq!(args.get::<i32>(0), None);
    assert!(Args::default().is_empty());
}

#[test]
fn typed_access() {
    let args = args![2, "two", String::from("zwei"),];
    assert_eq!(args.len(), 3);
    assert_eq!(args.get::<i32>(0), Some(&2));
    assert_eq!(args.get::<&str>(1), Some(&"two"));
    assert_eq!(args.get::<String>(2).map(String::as_str), Some("zwei"));

    // Literals are not widened
    assert_eq!(args.get::<i64>(0), None);
    assert_eq!(args.get::<i32>(3), None);
}

#[test]
fn clones_share_values() {
    let args = args![vec![1_u8, 2, 3]];
    let clone = args.clone();

    let original = args.iter().next().unwrap();
    let copied = clone.iter().next().unwrap();
    assert!(Arc::ptr_eq(original, copied));
}

#[test]
fn from_vec() {
    let values: Vec<Arg> = vec![Arc::new(1_u32), Arc::new(true)];
    let args = Args::from(values);
    assert_eq!(args.get::<u32>(0), Some(&1));
    assert_eq!(args.get::<bool>(1), Some(&true));
    assert_eq!(format!("{args:?}"), "Args { len: 2 }");
}
