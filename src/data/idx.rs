use crate::data::sample::LabeledSample;
use crate::error::DataError;

/// Parse a pair of IDX binary files (image + label) as used by MNIST and its
/// derivatives into labeled samples.
///
/// # IDX3 image file layout
/// ```text
/// bytes  0-1:   0x00 0x00   (reserved, must be zero)
/// byte   2:     0x08        (dtype = uint8)
/// byte   3:     0x03        (number of dimensions = 3)
/// bytes  4-7:   N           (number of images, big-endian u32)
/// bytes  8-11:  rows        (image height in pixels, big-endian u32)
/// bytes 12-15:  cols        (image width in pixels, big-endian u32)
/// bytes 16..:   N * rows * cols bytes, row-major, uint8
/// ```
///
/// # IDX1 label file layout
/// ```text
/// bytes  0-1:   0x00 0x00   (reserved, must be zero)
/// byte   2:     0x08        (dtype = uint8)
/// byte   3:     0x01        (number of dimensions = 1)
/// bytes  4-7:   N           (number of labels, big-endian u32)
/// bytes  8..:   N bytes, each a class index in [0, n_classes)
/// ```
///
/// Each sample's input holds `rows * cols` pixels divided by 255.0, and its
/// target is the one-hot encoding of the label over `n_classes`.
pub fn parse_idx_pair(
    image_bytes: &[u8],
    label_bytes: &[u8],
    n_classes: usize,
) -> Result<Vec<LabeledSample>, DataError> {
    if n_classes < 2 {
        return Err(DataError::Format(format!(
            "n_classes must be at least 2, got {}",
            n_classes
        )));
    }

    let (n_items, n_pixels) = parse_image_header(image_bytes)?;
    let n_labels = parse_label_header(label_bytes)?;

    if n_labels != n_items {
        return Err(DataError::CountMismatch {
            images: n_items,
            labels: n_labels,
        });
    }

    let image_data = &image_bytes[16..16 + n_items * n_pixels];
    let label_data = &label_bytes[8..8 + n_items];

    let mut samples = Vec::with_capacity(n_items);
    for (i, &class_idx) in label_data.iter().enumerate() {
        let class = class_idx as usize;
        if class >= n_classes {
            return Err(DataError::LabelOutOfRange {
                index: i,
                class,
                n_classes,
            });
        }
        let pixels = &image_data[i * n_pixels..(i + 1) * n_pixels];
        let input = pixels.iter().map(|&px| px as f64 / 255.0).collect();
        samples.push(LabeledSample::one_hot(input, class, n_classes));
    }

    Ok(samples)
}

/// Validates an IDX3 header and the data length it declares.
/// Returns `(n_items, rows * cols)`.
fn parse_image_header(bytes: &[u8]) -> Result<(usize, usize), DataError> {
    if bytes.len() < 16 {
        return Err(DataError::Format(format!(
            "image file too short: expected at least 16 header bytes, got {}",
            bytes.len()
        )));
    }
    check_magic(bytes, 0x03, "image")?;

    let n_items = read_be_u32(bytes, 4);
    let rows = read_be_u32(bytes, 8);
    let cols = read_be_u32(bytes, 12);

    let n_pixels = rows.checked_mul(cols).ok_or_else(|| {
        DataError::Format(format!(
            "image file: rows * cols overflows (rows={}, cols={})",
            rows, cols
        ))
    })?;
    let required = n_items
        .checked_mul(n_pixels)
        .and_then(|data| data.checked_add(16))
        .ok_or_else(|| DataError::Format("image file: declared data length overflows".into()))?;

    if bytes.len() < required {
        return Err(DataError::Format(format!(
            "image file too short: header declares {} items of {}x{} pixels \
             ({} bytes needed), but file is only {} bytes",
            n_items,
            rows,
            cols,
            required,
            bytes.len()
        )));
    }

    Ok((n_items, n_pixels))
}

/// Validates an IDX1 header and returns the label count.
fn parse_label_header(bytes: &[u8]) -> Result<usize, DataError> {
    if bytes.len() < 8 {
        return Err(DataError::Format(format!(
            "label file too short: expected at least 8 header bytes, got {}",
            bytes.len()
        )));
    }
    check_magic(bytes, 0x01, "label")?;

    let n_labels = read_be_u32(bytes, 4);
    let required = n_labels
        .checked_add(8)
        .ok_or_else(|| DataError::Format("label file: declared data length overflows".into()))?;
    if bytes.len() < required {
        return Err(DataError::Format(format!(
            "label file too short: header declares {} labels but file is only {} bytes",
            n_labels,
            bytes.len()
        )));
    }
    Ok(n_labels)
}

fn check_magic(bytes: &[u8], dimensions: u8, kind: &str) -> Result<(), DataError> {
    if bytes[0] != 0x00 || bytes[1] != 0x00 {
        return Err(DataError::Format(format!(
            "{} file: bytes 0-1 must be 0x00 0x00, got 0x{:02X} 0x{:02X}",
            kind, bytes[0], bytes[1]
        )));
    }
    if bytes[2] != 0x08 {
        return Err(DataError::Format(format!(
            "{} file: dtype byte must be 0x08 (uint8), got 0x{:02X}",
            kind, bytes[2]
        )));
    }
    if bytes[3] != dimensions {
        return Err(DataError::Format(format!(
            "{} file: expected {} dimensions, got {}",
            kind, dimensions, bytes[3]
        )));
    }
    Ok(())
}

fn read_be_u32(bytes: &[u8], offset: usize) -> usize {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]) as usize
}

/// Encodes images and labels as an IDX3/IDX1 byte pair; the inverse of
/// `parse_idx_pair` for `u8` pixels.
pub fn encode_idx_pair(
    images: &[Vec<u8>],
    rows: usize,
    cols: usize,
    labels: &[u8],
) -> (Vec<u8>, Vec<u8>) {
    let mut image_bytes = vec![0x00, 0x00, 0x08, 0x03];
    image_bytes.extend_from_slice(&(images.len() as u32).to_be_bytes());
    image_bytes.extend_from_slice(&(rows as u32).to_be_bytes());
    image_bytes.extend_from_slice(&(cols as u32).to_be_bytes());
    for image in images {
        image_bytes.extend_from_slice(image);
    }

    let mut label_bytes = vec![0x00, 0x00, 0x08, 0x01];
    label_bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    label_bytes.extend_from_slice(labels);

    (image_bytes, label_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> (Vec<u8>, Vec<u8>) {
        encode_idx_pair(&[vec![0, 255, 51, 102], vec![255, 255, 0, 0]], 2, 2, &[3, 0])
    }

    #[test]
    fn parses_pixels_and_one_hot_labels() {
        let (images, labels) = tiny();
        let samples = parse_idx_pair(&images, &labels, 10).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].input.as_slice(), &[0.0, 1.0, 0.2, 0.4]);
        assert_eq!(samples[0].label(), Some(3));
        assert_eq!(samples[0].target.len(), 10);
        assert_eq!(samples[1].label(), Some(0));
    }

    #[test]
    fn rejects_wrong_magic() {
        let (mut images, labels) = tiny();
        images[3] = 0x01;
        assert!(matches!(
            parse_idx_pair(&images, &labels, 10),
            Err(DataError::Format(_))
        ));
    }

    #[test]
    fn rejects_truncated_image_data() {
        let (images, labels) = tiny();
        let truncated = &images[..images.len() - 1];
        assert!(matches!(
            parse_idx_pair(truncated, &labels, 10),
            Err(DataError::Format(_))
        ));
    }

    #[test]
    fn rejects_count_mismatch() {
        let (images, _) = tiny();
        let (_, labels) = encode_idx_pair(&[], 2, 2, &[1]);
        assert!(matches!(
            parse_idx_pair(&images, &labels, 10),
            Err(DataError::CountMismatch { images: 2, labels: 1 })
        ));
    }

    #[test]
    fn rejects_label_out_of_range() {
        let (images, labels) = tiny();
        assert!(matches!(
            parse_idx_pair(&images, &labels, 3),
            Err(DataError::LabelOutOfRange { index: 0, class: 3, n_classes: 3 })
        ));
    }

    #[test]
    fn rejects_label_count_beyond_file_length() {
        let (images, mut labels) = tiny();
        labels[4..8].copy_from_slice(&u32::MAX.to_be_bytes());
        assert!(matches!(
            parse_idx_pair(&images, &labels, 10),
            Err(DataError::Format(_))
        ));
    }
}
