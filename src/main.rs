fn main() {
    unbak::run_cli();
}
