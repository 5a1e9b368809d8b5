use core::cell::Cell;

/// Exchanges the values held by `a` and `b`.
///
/// After the call `a` holds what `b` held before the call and vice versa. Never fails, never
/// allocates.
#[cfg_attr(flux, flux::sig(fn(a: &strg i32[@x], b: &strg i32[@y]) ensures a: i32[y], b: i32[x]))]
pub fn exchange(a: &mut i32, b: &mut i32) {
    let tmp = *a;
    *a = *b;
    *b = tmp;
}

/// Exchanges the values held by two cells.
///
/// `a` and `b` may be the same cell, in which case its value is left unchanged.
pub fn exchange_cells(a: &Cell<i32>, b: &Cell<i32>) {
    let tmp = a.get();
    a.set(b.get());
    b.set(tmp);
}

/// Exchanges the values behind two raw pointers.
///
/// `a == b` is allowed and leaves the pointee unchanged.
///
/// # Safety
///
/// Both `a` and `b` must be non-null, properly aligned and valid for reads and writes of an
/// `i32`. For the duration of the call neither location may be accessed through any other
/// pointer or reference.
#[cfg_attr(flux, flux::trusted)]
pub unsafe fn exchange_raw(a: *mut i32, b: *mut i32) {
    // SAFETY: validity of both pointers is guaranteed by the caller. Each access goes through
    // the raw pointer itself, so `a == b` never creates overlapping borrows.
    unsafe {
        let tmp = a.read();
        a.write(b.read());
        b.write(tmp);
    }
}


#[cfg(kani)]
mod verification {
    use core::{cell::Cell, ptr};

    use super::*;

    #[kani::proof]
    fn exchange_swaps() {
        let x: i32 = kani::any();
        let y: i32 = kani::any();
        let (mut a, mut b) = (x, y);
        exchange(&mut a, &mut b);
        assert!(a == y && b == x);
    }

    #[kani::proof]
    fn exchange_twice_is_identity() {
        let x: i32 = kani::any();
        let y: i32 = kani::any();
        let (mut a, mut b) = (x, y);
        exchange(&mut a, &mut b);
        exchange(&mut a, &mut b);
        assert!(a == x && b == y);
    }

    #[kani::proof]
    fn cells_self_exchange() {
        let x: i32 = kani::any();
        let cell = Cell::new(x);
        exchange_cells(&cell, &cell);
        assert!(cell.get() == x);
    }

    #[kani::proof]
    fn raw_self_exchange() {
        let x: i32 = kani::any();
        let mut slot = x;
        let p = ptr::addr_of_mut!(slot);
        unsafe { exchange_raw(p, p) };
        assert!(slot == x);
    }
}
