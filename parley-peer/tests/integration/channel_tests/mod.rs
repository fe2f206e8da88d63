mod test_echo_after_teardown_is_noop;
mod test_local_channel_greets_on_open;
mod test_replaced_channel_keeps_echoing;
