mod test_client_disconnect_notifies_host;
mod test_client_joins_room;
mod test_duplicate_answer_ignored;
mod test_host_disconnect;
mod test_unknown_room_rejected;
