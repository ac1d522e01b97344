use super::Scroll;

#[test]
fn it_clamps_scrolling_to_the_list_bounds() {
    let mut scroll = Scroll::default();
    scroll.set_state(30, 10);

    scroll.up();
    assert_eq!(scroll.position, 0);

    scroll.down_page();
    scroll.down_page();
    scroll.down_page();
    assert_eq!(scroll.position, 20);

    scroll.up_page();
    assert_eq!(scroll.position, 10);

    scroll.down();
    assert_eq!(scroll.position, 11);
}

#[test]
fn it_jumps_to_the_last_line() {
    let mut scroll = Scroll::default();
    scroll.set_state(30, 10);

    scroll.last();
    assert_eq!(scroll.position, 20);
}

#[test]
fn it_resets_the_position_when_the_list_shrinks() {
    let mut scroll = Scroll::default();
    scroll.set_state(30, 10);
    scroll.last();

    scroll.set_state(5, 10);
    assert_eq!(scroll.position, 0);
}
