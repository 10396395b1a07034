// vim: tw=80
//! Return resolution: fixed values, void, sequential wrap-around, mapped
//! lookup, and callbacks.
#![deny(warnings)]

use standin::{Error, Mock};

mod value {
    use super::*;

    #[test]
    fn returns_a_clone_every_time() {
        let mut mock = Mock::new("Foo::foo");
        mock.expects_any().returning(7);
        assert_eq!(Some(7), mock.invoke(&[]).unwrap());
        assert_eq!(Some(7), mock.invoke(&[]).unwrap());
    }
}

mod void {
    use super::*;

    #[test]
    fn produces_no_value() {
        let mut mock = Mock::<i32>::new("Foo::foo");
        mock.expects_any().returning_void();
        assert_eq!(None, mock.invoke(&[]).unwrap());
    }
}

mod sequential {
    use super::*;

    #[test]
    fn wraps_around() {
        let mut mock = Mock::new("Feed::next");
        mock.expects_any().returning_from(vec![1, 2, 3]);
        let got: Vec<_> = (0..5)
            .map(|_| mock.invoke(&[]).unwrap().unwrap())
            .collect();
        assert_eq!(vec![1, 2, 3, 1, 2], got);
    }

    #[test]
    fn single_element_repeats() {
        let mut mock = Mock::new("Feed::next");
        mock.expects_any().returning_from(vec![9]);
        assert_eq!(Some(9), mock.invoke(&[]).unwrap());
        assert_eq!(Some(9), mock.invoke(&[]).unwrap());
    }

    #[test]
    #[should_panic(expected = "at least one value")]
    fn empty_sequence_is_a_programming_error() {
        let mut mock = Mock::new("Feed::next");
        mock.expects_any().returning_from(Vec::<i32>::new());
    }
}

mod mapped {
    use super::*;

    #[test]
    fn looks_up_by_computed_key() {
        let mut mock = Mock::new("Lookup::get");
        mock.expects_any().returning_mapped_value_from(
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ],
            |args| args[0].clone(),
        );
        assert_eq!(Some("1".to_string()),
                   mock.invoke(&["a".to_string()]).unwrap());
        assert_eq!(Some("2".to_string()),
                   mock.invoke(&["b".to_string()]).unwrap());
    }

    #[test]
    fn absent_key_fails() {
        let mut mock = Mock::new("Lookup::get");
        mock.expects_any().returning_mapped_value_from(
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ],
            |args| args[0].clone(),
        );
        match mock.invoke(&["c".to_string()]) {
            Err(Error::UnresolvedKey { target, key }) => {
                assert_eq!("Lookup::get", target);
                assert!(key.contains('c'), "{}", key);
            },
            other => panic!("expected an unresolved-key error, got {:?}",
                            other),
        }
    }

    #[test]
    #[should_panic(expected = "at least one entry")]
    fn empty_map_is_a_programming_error() {
        let mut mock = Mock::new("Lookup::get");
        mock.expects_any()
            .returning_mapped_value_from(Vec::<(i32, i32)>::new(),
                                         |args| args[0]);
    }
}

mod callback {
    use super::*;

    #[test]
    fn receives_the_actual_arguments() {
        let mut mock = Mock::new("Adder::add");
        mock.expects_any().returning_using(|args| args.iter().sum());
        assert_eq!(Some(6), mock.invoke(&[1, 2, 3]).unwrap());
        assert_eq!(Some(11), mock.invoke(&[5, 6]).unwrap());
    }

    #[test]
    fn may_mutate_its_own_state() {
        let mut mock = Mock::new("Counter::next");
        let mut n = 0;
        mock.expects_any().returning_using(move |_| {
            n += 1;
            n
        });
        assert_eq!(Some(1), mock.invoke(&[]).unwrap());
        assert_eq!(Some(2), mock.invoke(&[]).unwrap());
    }
}

mod unset {
    use super::*;

    #[test]
    fn resolving_without_a_strategy_fails() {
        let mut mock = Mock::<i32>::new("Foo::foo");
        mock.expects_any();
        match mock.invoke(&[]) {
            Err(Error::MissingReturn { target }) => {
                assert_eq!("Foo::foo", target);
            },
            other => panic!("expected a missing-return error, got {:?}",
                            other),
        }
    }
}
