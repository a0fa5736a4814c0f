// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Conditional expression on one line.  Rust's `if` is already an
/// expression, but `cargo fmt` spreads it over five lines, and the
/// wrap-around tables for image borders (first row, last row, first
/// column, last column) read far better when each case fits on one.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
