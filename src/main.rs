fn main() {
    skyward::game::run();
}
