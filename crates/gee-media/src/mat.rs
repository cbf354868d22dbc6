//! Conversion between OpenCV `Mat` and owned frames.

use opencv::core::{Mat, Scalar, CV_8U, CV_8UC1, CV_8UC3, CV_8UC4};
use opencv::prelude::*;

use crate::error::{MediaError, MediaResult};
use crate::frame::Frame;

/// Copy an 8-bit `Mat` into an owned frame.
pub(crate) fn mat_to_frame(mat: &Mat) -> MediaResult<Frame> {
    if mat.empty() {
        return Err(MediaError::invalid_frame("empty Mat"));
    }
    if mat.depth() != CV_8U {
        return Err(MediaError::invalid_frame(format!(
            "unsupported Mat depth {}",
            mat.depth()
        )));
    }

    let continuous;
    let mat = if mat.is_continuous() {
        mat
    } else {
        continuous = mat
            .try_clone()
            .map_err(|e| MediaError::invalid_frame(format!("Mat clone: {}", e)))?;
        &continuous
    };

    let bytes = mat
        .data_bytes()
        .map_err(|e| MediaError::invalid_frame(format!("Mat data: {}", e)))?;

    Frame::new(
        mat.cols() as u32,
        mat.rows() as u32,
        mat.channels() as u8,
        bytes.to_vec(),
    )
}

/// Copy an owned frame into a new `Mat`.
pub(crate) fn frame_to_mat(frame: &Frame) -> MediaResult<Mat> {
    let typ = match frame.channels() {
        1 => CV_8UC1,
        3 => CV_8UC3,
        4 => CV_8UC4,
        other => {
            return Err(MediaError::invalid_frame(format!(
                "unsupported channel count {}",
                other
            )))
        }
    };

    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        typ,
        Scalar::all(0.0),
    )
    .map_err(|e| MediaError::invalid_frame(format!("Mat alloc: {}", e)))?;

    mat.data_bytes_mut()
        .map_err(|e| MediaError::invalid_frame(format!("Mat data: {}", e)))?
        .copy_from_slice(frame.data());

    Ok(mat)
}
