use anyhow::Result;

fn main() -> Result<()> {
    distwalk_lib::main()
}
