mod width;

use crate::Width;

fn width(bits: u32) -> Width {
    Width::new(bits).expect("valid width")
}
