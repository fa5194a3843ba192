fn main() {
    autobuild::run_cli();
}
