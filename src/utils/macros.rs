/// Builds a `BTreeMap` from `key => value` pairs.
#[macro_export]
macro_rules! map {
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {
        {
            let mut _map = ::std::collections::BTreeMap::new();

            $(
                _map.insert($key, $value);
            )+

            _map
        }
    };
}
