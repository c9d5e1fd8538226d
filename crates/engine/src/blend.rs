use recs_core::types::ItemId;

/// Merge two ranked lists into one.
///
/// For every position below the shorter length, even positions take the
/// offline item and odd positions take the online item at the same index.
/// The remainder of the longer list is then appended as is.
pub fn blend(offline: &[ItemId], online: &[ItemId]) -> Vec<ItemId> {
    let min_len = offline.len().min(online.len());
    let mut blended = Vec::with_capacity(offline.len().max(online.len()));

    for i in 0..min_len {
        if i % 2 == 0 {
            blended.push(offline[i]);
        } else {
            blended.push(online[i]);
        }
    }

    let tail = if offline.len() < online.len() {
        &online[min_len..]
    } else {
        &offline[min_len..]
    };
    blended.extend_from_slice(tail);
    blended
}
