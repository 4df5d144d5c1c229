//! Fixed-size batching of payloads.

/// Split `items` into consecutive chunks of at most `chunk_size` elements.
///
/// Order is preserved and nothing is dropped or duplicated: concatenating the
/// returned batches yields `items` again. A `chunk_size` of 0 is treated as 1.
pub fn into_batches<T>(items: Vec<T>, chunk_size: usize) -> Vec<Vec<T>> {
    let chunk_size = chunk_size.max(1);
    let mut batches = Vec::with_capacity(items.len().div_ceil(chunk_size));
    let mut current = Vec::with_capacity(chunk_size);

    for item in items {
        current.push(item);
        if current.len() == chunk_size {
            batches.push(std::mem::replace(
                &mut current,
                Vec::with_capacity(chunk_size),
            ));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}
