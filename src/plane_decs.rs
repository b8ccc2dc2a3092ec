use crate::util::StrictApi as _;

/// Description for a Plane which can be used to implement bounds checks, stride calculation and buffer sizes.
///
/// Not used by the compositors themselves, only utility functions.
#[derive(Clone, Copy)]
pub(crate) struct PlaneDesc {
    pub(crate) width_op: Op,
    pub(crate) height_op: Op,

    /// Bytes per pixel (or per subsampled sample) in this plane
    pub(crate) bytes_per_sample: usize,
}

impl PlaneDesc {
    pub(crate) fn packed_stride(&self, width: usize) -> usize {
        self.width_op.op(width).strict_mul_(self.bytes_per_sample)
    }
}

/// Plane's number of samples in relation to width / height
#[derive(Clone, Copy)]
pub(crate) enum Op {
    Div(usize),
    Identity,
}

impl Op {
    pub(crate) fn op(self, lhs: usize) -> usize {
        match self {
            Op::Div(rhs) => lhs / rhs,
            Op::Identity => lhs,
        }
    }
}

pub(crate) const I420_PLANES: [PlaneDesc; 3] = [
    PlaneDesc {
        width_op: Op::Identity,
        height_op: Op::Identity,
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Div(2),
        bytes_per_sample: 1,
    },
    PlaneDesc {
        width_op: Op::Div(2),
        height_op: Op::Div(2),
        bytes_per_sample: 1,
    },
];

pub(crate) const RGB_PLANES: [PlaneDesc; 1] = [PlaneDesc {
    width_op: Op::Identity,
    height_op: Op::Identity,
    bytes_per_sample: 3,
}];

pub(crate) const ARGB_PLANES: [PlaneDesc; 1] = [PlaneDesc {
    width_op: Op::Identity,
    height_op: Op::Identity,
    bytes_per_sample: 4,
}];
