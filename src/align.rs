/// Rounds the given size up to the next multiple of the machine word.
///
/// Every request size and growth request passes through this macro, so all
/// block arithmetic stays word-aligned.
///
/// # Examples
///
/// ```rust
/// use rmalloc::align;
///
/// match std::mem::size_of::<usize>() {
///     8 => assert_eq!(align!(9), 16), // 64 bit machine.
///     4 => assert_eq!(align!(9), 12), // 32 bit machine.
///     _ => {},
/// };
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    ($value + ::std::mem::size_of::<usize>() - 1) & !(::std::mem::size_of::<usize>() - 1)
  };
}

#[cfg(test)]
mod tests {
  use std::mem;

  #[test]
  fn rounds_up_to_word_multiples() {
    let word = mem::size_of::<usize>();

    assert_eq!(align!(0), 0);

    for i in 1..10 {
      let multiple = word * i;

      assert_eq!(align!(multiple), multiple);
      assert_eq!(align!(multiple - 1), multiple);
      assert_eq!(align!(multiple + 1), multiple + word);
    }
  }
}
