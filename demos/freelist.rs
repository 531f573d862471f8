use rmalloc::{Address, BlockStatus, FixedBackend, FreeListAllocator};

/// Start of the simulated heap region. Any word-aligned value works; a
/// recognizable one makes the printed addresses easy to follow.
const BASE: Address = 0x1000_0000;

fn link(address: Option<Address>) -> String {
  match address {
    Some(address) => format!("{address:#x}"),
    None => "none".to_string(),
  }
}

/// Prints every block the allocator tracks, lowest address first, in the
/// same shape a debugger walk of the headers would produce.
fn print_block_list(
  label: &str,
  allocator: &FreeListAllocator<FixedBackend>,
) {
  println!("--- {label} ---");

  for (i, info) in allocator.blocks().enumerate() {
    println!("[{i}] block: {:#x}", info.address);
    println!("[{i}] payload: {:#x} ({} bytes)", info.payload_address(), info.payload_size);
    println!(
      "[{i}] status: {}",
      match info.status {
        BlockStatus::Allocated => "allocated",
        BlockStatus::Free => "free",
      }
    );
    println!("[{i}] preceding: {}", link(info.preceding));
    println!("[{i}] following: {}", link(info.following));
    println!("___________________________");
  }

  println!("boundary: {:#x}", allocator.boundary());
  println!("===========================\n");
}

fn main() {
  // Surfaces the engine's debug! records; run with RUST_LOG=debug to see
  // every reuse, split, merge and growth as it happens.
  env_logger::init();

  // A deterministic 1 MiB heap. Swapping in SbrkBackend would drive the
  // real program break instead.
  let mut allocator = FreeListAllocator::new(FixedBackend::new(BASE, 1 << 20));

  println!("fresh heap, boundary = {:#x}\n", allocator.boundary());

  // --------------------------------------------------------------------
  // 1) A burst of allocations of growing size. The first one claims a
  //    whole growth increment, so the later ones are carved out of the
  //    surplus instead of moving the boundary again.
  // --------------------------------------------------------------------
  let p1 = allocator.alloc(10).expect("alloc(10)");
  print_block_list("after alloc(10)", &allocator);

  let p2 = allocator.alloc(100).expect("alloc(100)");
  print_block_list("after alloc(100)", &allocator);

  let p3 = allocator.alloc(200).expect("alloc(200)");
  print_block_list("after alloc(200)", &allocator);

  let p4 = allocator.alloc(500).expect("alloc(500)");
  print_block_list("after alloc(500)", &allocator);

  // --------------------------------------------------------------------
  // 2) Free the two middle blocks. The second free finds a free neighbor
  //    on its right and the two merge into one span.
  // --------------------------------------------------------------------
  allocator.free(Some(p3)).expect("free p3");
  print_block_list("after free(p3) - isolated free block", &allocator);

  allocator.free(Some(p2)).expect("free p2");
  print_block_list("after free(p2) - merged with p3's block", &allocator);

  // --------------------------------------------------------------------
  // 3) A request that fits the merged span: it is reused and split, no
  //    boundary movement.
  // --------------------------------------------------------------------
  let p5 = allocator.alloc(150).expect("alloc(150)");
  println!(
    "alloc(150) reused p2's region: {}\n",
    if p5 == p2 { "yes" } else { "no" },
  );
  print_block_list("after alloc(150) - split the merged span", &allocator);

  let p6 = allocator.alloc(500).expect("alloc(500)");
  print_block_list("after second alloc(500)", &allocator);

  // --------------------------------------------------------------------
  // 4) Release everything. Each free coalesces with whatever free
  //    neighbors exist, until one span covers the whole heap.
  // --------------------------------------------------------------------
  allocator.free(Some(p4)).expect("free p4");
  allocator.free(Some(p5)).expect("free p5");
  allocator.free(Some(p6)).expect("free p6");
  allocator.free(Some(p1)).expect("free p1");
  print_block_list("after freeing everything", &allocator);

  // --------------------------------------------------------------------
  // 5) Misuse is reported, never fatal.
  // --------------------------------------------------------------------
  match allocator.free(Some(BASE - 0x100)) {
    Err(error) => println!("free(before heap base): {error}"),
    Ok(()) => println!("free(before heap base): unexpectedly succeeded"),
  }

  let p7 = allocator.alloc(64).expect("alloc(64)");
  allocator.free(Some(p7)).expect("free p7");

  match allocator.free(Some(p7)) {
    Err(error) => println!("free(p7) a second time: {error}"),
    Ok(()) => println!("free(p7) a second time: unexpectedly succeeded"),
  }
}
