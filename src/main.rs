fn main() {
    rodeo::term::main()
}
