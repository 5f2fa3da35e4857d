// demos/basic_usage.rs
//! Basic usage of the buffer operations

use buftools::buffer::{compare, concat, equals, fill, from_hex, index_of, reverse, to_hex};
use buftools::prelude::*;

fn main() -> Result<()> {
    println!("=== Fill and Clear ===\n");

    let mut buf = ByteBuffer::new(8);
    fill(&mut buf, 0x2au8)?;
    println!("fill 0x2a:   {:?}", buf);
    fill(&mut buf, "ab")?;
    println!("fill \"ab\":   {:?}", buf);
    buftools::buffer::clear(&mut buf);
    println!("clear:       {:?}", buf);

    println!("\n=== Compare and Search ===\n");

    let greeting = ByteBuffer::from_text("Hello, world!", Encoding::Utf8)?;
    println!("equals \"Hello, world!\": {}", equals(&greeting, "Hello, world!")?);
    println!("compare with \"Hello\":   {:?}", compare(&greeting, "Hello")?);
    println!("index of \"world\":       {:?}", index_of(&greeting, "world", 0)?);
    println!("index of \"xyz\":         {:?}", index_of(&greeting, "xyz", 0)?);

    println!("\n=== Reverse, Concat, Hex ===\n");

    let joined = concat(["foo", "bar", "baz"])?;
    println!("concat:  {}", joined.to_text(Encoding::Utf8));
    println!("reverse: {}", reverse(&joined).to_text(Encoding::Utf8));

    let hex = to_hex("\t \r\n");
    println!("to_hex:   {}", hex);
    println!("from_hex: {:?}", from_hex(&hex)?);

    match from_hex("abc") {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("from_hex(\"abc\") failed: {}", e),
    }

    Ok(())
}
