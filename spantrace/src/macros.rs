// Copyright (C) 2025 Category Labs, Inc.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

/// Times the rest of the enclosing block.
///
/// ```rust
/// let profiler = spantrace::Profiler::new();
/// {
///     spantrace::profile_scope!(profiler, "load");
///     spantrace::profile_scope!(profiler, "decode", "codec");
/// }
/// ```
///
/// The guards are dropped, and their spans reported, in reverse order at the
/// end of the block.
#[macro_export]
macro_rules! profile_scope {
    ($profiler:expr, $name:expr) => {
        let _spantrace_scope = $profiler.timer($name);
    };
    ($profiler:expr, $name:expr, $category:expr) => {
        let _spantrace_scope = $profiler.timer_with_category($name, $category);
    };
}

/// Times the rest of the enclosing function, named after its path.
#[macro_export]
macro_rules! profile_function {
    ($profiler:expr) => {
        $crate::profile_scope!($profiler, $crate::function_name!());
    };
    ($profiler:expr, $category:expr) => {
        $crate::profile_scope!($profiler, $crate::function_name!(), $category);
    };
}

/// Path of the enclosing function, e.g. `my_crate::module::work`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::__trim_function_name(type_name_of(f))
    }};
}

#[doc(hidden)]
pub fn __trim_function_name(raw: &'static str) -> &'static str {
    let mut name = raw.strip_suffix("::f").unwrap_or(raw);
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}
