fn main() -> anyhow::Result<()> {
    chance_to_beat_lib::run(std::env::args().skip(1).collect())
}
