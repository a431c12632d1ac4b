//! Copy kernels that materialize strided views into dense row-major buffers.

use log::trace;

use crate::layout::increment_index;
use crate::view::ArrayView;

/// Copy the logical row-major contents of `view` into a fresh buffer.
///
/// Three paths, fastest first:
/// - the whole view is one contiguous run: a single slice copy
/// - the innermost stride is 1: copy each innermost row as a contiguous run
/// - otherwise: walk every multi-index
pub(crate) fn gather(view: &ArrayView<'_>) -> Vec<f64> {
    let total = view.len();
    if let Some(slice) = view.as_slice() {
        trace!("gather: contiguous copy of {total} elements");
        return slice.to_vec();
    }

    let dims = view.dims();
    let rank = dims.len();
    let mut out = Vec::with_capacity(total);
    if total == 0 {
        return out;
    }
    let data = view.data();

    if view.strides()[rank - 1] == 1 {
        let run = dims[rank - 1];
        let outer = &dims[..rank - 1];
        trace!("gather: {} runs of {run} elements", total / run);
        let mut idx = vec![0usize; rank];
        loop {
            let start = view.linear_index(&idx);
            out.extend_from_slice(&data[start..start + run]);
            if !increment_index(&mut idx[..rank - 1], outer) {
                break;
            }
        }
        return out;
    }

    trace!("gather: element walk over dims {dims:?}");
    let mut idx = vec![0usize; rank];
    for _ in 0..total {
        out.push(data[view.linear_index(&idx)]);
        increment_index(&mut idx, dims);
    }
    out
}

/// Copy `outer` consecutive blocks of `block` elements from `src` into
/// `dest`, starting at `dest_offset` and placing blocks `dest_stride` apart.
///
/// Used to place each operand of a concatenation into its slot of the result.
pub(crate) fn scatter_blocks(
    dest: &mut [f64],
    src: &[f64],
    outer: usize,
    block: usize,
    dest_offset: usize,
    dest_stride: usize,
) {
    for i in 0..outer {
        let s = i * block;
        let d = dest_offset + i * dest_stride;
        dest[d..d + block].copy_from_slice(&src[s..s + block]);
    }
}
