mod board_rooms;
