// vim: tw=80
//! Call count policies, their verification, and checkpoints.
#![deny(warnings)]

use standin::{Error, ExpectedCount, Mock};

fn invoke_n(mock: &mut Mock<i32>, n: usize) {
    for _ in 0..n {
        mock.invoke(&[1]).unwrap();
    }
}

mod exact {
    use super::*;

    #[test]
    fn satisfied_only_at_exactly_n() {
        let mut mock = Mock::new("Foo::foo");
        mock.expects([1]).times(3).returning(0);
        invoke_n(&mut mock, 2);
        assert_eq!(1, mock.unsatisfied().len());
        invoke_n(&mut mock, 1);
        assert!(mock.unsatisfied().is_empty());
        // a non-consuming mock keeps matching, so the count overshoots
        invoke_n(&mut mock, 1);
        assert_eq!(1, mock.unsatisfied().len());
    }

    #[test]
    fn report_carries_the_counts() {
        let mut mock = Mock::new("Foo::foo");
        mock.expects([1]).twice().returning(0);
        invoke_n(&mut mock, 1);
        let u = &mock.unsatisfied()[0];
        assert_eq!("Foo::foo", u.target);
        assert_eq!(1, u.actual);
        assert_eq!(ExpectedCount::Exact(2), u.expected);
        assert!(u.pattern.contains('1'), "{}", u.pattern);
    }
}

mod never {
    use super::*;

    #[test]
    fn satisfied_until_invoked() {
        let mut mock = Mock::new("Foo::foo");
        mock.expects([1]).never().returning(0);
        assert!(mock.unsatisfied().is_empty());
        mock.invoke(&[1]).unwrap();
        assert_eq!(1, mock.unsatisfied().len());
    }
}

mod unlimited {
    use super::*;

    #[test]
    fn always_satisfied() {
        let mut mock = Mock::new("Foo::foo");
        mock.expects([1]).returning(0);
        assert!(mock.unsatisfied().is_empty());
        invoke_n(&mut mock, 10);
        assert!(mock.unsatisfied().is_empty());
    }
}

mod implicit_wildcard {
    use super::*;

    #[test]
    fn count_setter_without_expects_starts_a_wildcard_expectation() {
        let mut mock = Mock::new("Foo::foo");
        mock.once().returning(3);
        assert_eq!(Some(3), mock.invoke(&[99]).unwrap());
        assert!(mock.unsatisfied().is_empty());
    }

    #[test]
    fn return_setter_without_expects_starts_a_wildcard_expectation() {
        let mut mock = Mock::new("Foo::foo");
        mock.returning(8);
        assert_eq!(Some(8), mock.invoke(&[1, 2]).unwrap());
    }

    #[test]
    fn expects_always_starts_a_new_expectation() {
        let mut mock = Mock::new("Foo::foo");
        mock.expects([1]).returning(10);
        mock.expects([1]).returning(20);
        // the second expects must not reconfigure the first
        assert_eq!(Some(10), mock.invoke(&[1]).unwrap());
    }
}

mod checkpoint {
    use super::*;

    #[test]
    fn verifies_and_clears() {
        let mut mock = Mock::new("Foo::foo");
        mock.expects([1]).once().returning(0);
        mock.invoke(&[1]).unwrap();
        assert!(mock.checkpoint().is_ok());
        // cleared: the same call now has no expectation to land on
        assert!(mock.invoke(&[1]).is_err());
    }

    #[test]
    fn fails_on_unsatisfied_counts() {
        let mut mock = Mock::new("Foo::foo");
        mock.expects([1]).twice().returning(0);
        mock.invoke(&[1]).unwrap();
        match mock.checkpoint() {
            Err(Error::Unsatisfied(failures)) => {
                assert_eq!(1, failures.len());
            },
            other => panic!("expected a verification failure, got {:?}",
                            other),
        }
    }
}
