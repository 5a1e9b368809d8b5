#[path = "../../../../lib/exchange/src/swap.rs"]
pub mod swap;

use flux_rs::assert;
use swap::exchange;

pub fn test00() {
    let mut a = 5;
    let mut b = 9;
    exchange(&mut a, &mut b);
    assert(a == 5); //~ ERROR refinement type
}

#[flux::sig(fn(x: &strg i32[@n], y: &strg i32[@m]) ensures x: i32[m], y: i32[n])]
pub fn exchange_twice(x: &mut i32, y: &mut i32) {
    exchange(x, y);
    exchange(x, y);
} //~ ERROR refinement type
