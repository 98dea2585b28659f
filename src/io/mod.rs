// Copyright @yucwang 2026

pub mod dataset;
pub mod exr_utils;
pub mod png_utils;

use std::fmt;

#[derive(Debug)]
pub enum IoError {
    Io(std::io::Error),
    Exr(exr::error::Error),
    Image(image::ImageError),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Io(err)
    }
}

impl From<exr::error::Error> for IoError {
    fn from(err: exr::error::Error) -> Self {
        IoError::Exr(err)
    }
}

impl From<image::ImageError> for IoError {
    fn from(err: image::ImageError) -> Self {
        IoError::Image(err)
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::Io(err) => write!(f, "io error: {}", err),
            IoError::Exr(err) => write!(f, "exr error: {}", err),
            IoError::Image(err) => write!(f, "image error: {}", err),
        }
    }
}

impl std::error::Error for IoError {}
