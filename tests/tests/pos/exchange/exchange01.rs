#[path = "../../../../lib/exchange/src/swap.rs"]
pub mod swap;

use flux_rs::assert;
use swap::exchange;

#[flux::sig(fn(x: &strg i32[@n], y: &strg i32[@m]) ensures x: i32[n], y: i32[m])]
pub fn exchange_twice(x: &mut i32, y: &mut i32) {
    exchange(x, y);
    exchange(x, y);
}

#[flux::sig(fn(x: &strg i32[@n], y: &strg i32[@m]) ensures x: i32{v: v <= n && v <= m}, y: i32{v: v >= n && v >= m})]
pub fn sort2(x: &mut i32, y: &mut i32) {
    if *x > *y {
        exchange(x, y);
    }
}

pub fn test00() {
    let mut a = -7;
    let mut b = 0;
    exchange(&mut a, &mut b);
    assert(a == 0);
    assert(b == -7);
}

pub fn test01() {
    let mut a = 9;
    let mut b = 5;
    sort2(&mut a, &mut b);
    assert(a <= b);
}
