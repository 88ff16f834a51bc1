/*
Logic: Walk the input, tracking how many identical bytes we have seen in a row. Once we see the
fourth, the byte after it is a count of how many more copies follow. Output those copies, skip the
count byte, and start looking for a fresh run. The count byte is never consumed for runs shorter than
four, and a run of four at the very end of the block (with no count byte) is left alone.
*/
/// Unencodes runs of four or more characters from the RLE1 phase
pub fn rle1_decode(v: &[u8]) -> Vec<u8> {
    // Create a vec with a little more than the capacity of the input, runs only grow it
    let mut out = Vec::with_capacity(v.len() + v.len() / 4);
    let mut iter = v.iter();
    let mut run = 0;
    let mut last: Option<u8> = None;

    while let Some(&byte) = iter.next() {
        out.push(byte);
        if last == Some(byte) {
            run += 1;
        } else {
            last = Some(byte);
            run = 1;
        }

        if run == 4 {
            // The next byte (if any) says how many more copies we need
            if let Some(&count) = iter.next() {
                out.resize(out.len() + count as usize, byte);
            }
            run = 0;
            last = None;
        }
    }
    out
}

#[test]
fn rle1_de_simple() {
    let input: Vec<u8> = vec![
        71, 111, 111, 102, 121, 32, 116, 101, 101, 101, 101, 4, 115, 116,
    ];
    assert_eq!(rle1_decode(&input), "Goofy teeeeeeeest".as_bytes());
}

#[test]
fn rle1_de_zero_count() {
    assert_eq!(rle1_decode(&[7, 7, 7, 7, 0, 8]), vec![7, 7, 7, 7, 8]);
}

#[test]
fn rle1_de_no_count_for_short_runs() {
    assert_eq!(rle1_decode(&[5, 5, 5, 3, 5, 5]), vec![5, 5, 5, 3, 5, 5]);
}

#[test]
fn rle1_de_run_at_end_without_count() {
    assert_eq!(rle1_decode(b"abbbb"), b"abbbb".to_vec());
}

#[test]
fn rle1_de_long_runs_restart_after_count() {
    // 4 + 255 copies, then a new run of 4 + 1
    let input = [9, 9, 9, 9, 255, 9, 9, 9, 9, 1];
    assert_eq!(rle1_decode(&input), vec![9; 264]);
}

#[test]
fn rle1_de_count_byte_equal_to_run_byte() {
    // A count byte that happens to match the run byte must not start a new run
    let input = [2, 2, 2, 2, 2, 2, 2];
    assert_eq!(rle1_decode(&input), vec![2; 8]);
}

#[test]
fn rle1_de_empty() {
    assert!(rle1_decode(&[]).is_empty());
}
